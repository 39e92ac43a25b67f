//! The angle grid that steers particles.
//!
//! Every cell holds a heading in radians computed from a closed-form
//! function of the cell coordinates and a phase that advances each frame:
//!
//! ```text
//! angle = 1.01 * L(phase) * cos(y * zoom) * curve - 1.01 * cos(phase) * sin(x * zoom)
//! ```
//!
//! `L` is `sin` when the field is first built for a viewport and `cos` for
//! every per-frame regeneration. The two variants are kept distinct.

use flowfield_core::error::EngineError;
use flowfield_core::grid::Grid;

/// Amplitude applied to both terms of the angle function.
const AMPLITUDE: f64 = 1.01;
/// Phase increment applied after each regeneration.
pub const PHASE_STEP: f64 = 0.005;
/// Phase of a freshly created field.
pub const INITIAL_PHASE: f64 = 1.0;

/// Which trigonometric function leads the first term of the angle formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadingTerm {
    /// `sin(phase)`: used when the field is built for a viewport.
    Sine,
    /// `cos(phase)`: used by per-frame regeneration.
    Cosine,
}

/// Angle for grid cell `(x, y)`.
pub fn angle(x: usize, y: usize, curve: f64, zoom: f64, phase: f64, lead: LeadingTerm) -> f64 {
    let leading = match lead {
        LeadingTerm::Sine => phase.sin(),
        LeadingTerm::Cosine => phase.cos(),
    };
    AMPLITUDE * leading * (y as f64 * zoom).cos() * curve
        - AMPLITUDE * phase.cos() * (x as f64 * zoom).sin()
}

/// Evaluates [`angle`] for every cell in row-major order.
pub fn generate(
    cols: usize,
    rows: usize,
    curve: f64,
    zoom: f64,
    phase: f64,
    lead: LeadingTerm,
) -> Vec<f64> {
    (0..rows)
        .flat_map(|y| (0..cols).map(move |x| angle(x, y, curve, zoom, phase, lead)))
        .collect()
}

/// A `cols x rows` grid of headings covering the viewport.
#[derive(Debug, Clone)]
pub struct FlowField {
    grid: Grid,
    cell_size: usize,
    curve: f64,
    zoom: f64,
    phase: f64,
}

impl FlowField {
    /// Builds the sine-leading field for a `width x height` viewport.
    ///
    /// `cols = width / cell_size` and `rows = height / cell_size` (floored).
    /// Returns `EngineError::InvalidParam` for a zero cell size and
    /// `EngineError::InvalidDimensions` if the viewport holds no whole cell.
    pub fn new(
        width: usize,
        height: usize,
        cell_size: usize,
        curve: f64,
        zoom: f64,
        phase: f64,
    ) -> Result<Self, EngineError> {
        let grid = build_grid(width, height, cell_size, curve, zoom, phase)?;
        Ok(Self {
            grid,
            cell_size,
            curve,
            zoom,
            phase,
        })
    }

    /// Rebuilds the grid for a new viewport with the sine-leading variant.
    ///
    /// The phase carries over unchanged.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), EngineError> {
        self.grid = build_grid(
            width,
            height,
            self.cell_size,
            self.curve,
            self.zoom,
            self.phase,
        )?;
        Ok(())
    }

    /// Replaces every angle with the cosine-leading variant at the current
    /// phase, then advances the phase by [`PHASE_STEP`].
    pub fn regenerate(&mut self) {
        let (curve, zoom, phase) = (self.curve, self.zoom, self.phase);
        self.grid
            .refill(|x, y| angle(x, y, curve, zoom, phase, LeadingTerm::Cosine));
        self.phase += PHASE_STEP;
        log::trace!("flow field regenerated, phase now {}", self.phase);
    }

    /// Heading under pixel position `(x, y)`.
    ///
    /// The cell is `(floor(x / cell_size), floor(y / cell_size))` with each
    /// axis clamped into the grid, so positions off the viewport read the
    /// nearest edge cell.
    pub fn angle_at(&self, x: f64, y: f64) -> f64 {
        let size = self.cell_size as f64;
        // Saturating float-to-int casts keep huge or non-finite drift in range.
        let gx = (x / size).floor() as i64;
        let gy = (y / size).floor() as i64;
        self.grid.get_clamped(gx, gy)
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cell_size(&self) -> usize {
        self.cell_size
    }

    /// Phase the next regeneration will use.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Row-major angles, `rows * cols` long.
    pub fn angles(&self) -> &[f64] {
        self.grid.data()
    }
}

fn build_grid(
    width: usize,
    height: usize,
    cell_size: usize,
    curve: f64,
    zoom: f64,
    phase: f64,
) -> Result<Grid, EngineError> {
    if cell_size == 0 {
        return Err(EngineError::InvalidParam {
            name: "cell_size".into(),
            reason: "must be at least 1".into(),
        });
    }
    let cols = width / cell_size;
    let rows = height / cell_size;
    if cols == 0 || rows == 0 {
        return Err(EngineError::InvalidDimensions { width, height });
    }
    Grid::from_fn(cols, rows, |x, y| {
        angle(x, y, curve, zoom, phase, LeadingTerm::Sine)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVE: f64 = 2.1;
    const ZOOM: f64 = 0.01;

    fn field(width: usize, height: usize) -> FlowField {
        FlowField::new(width, height, 5, CURVE, ZOOM, INITIAL_PHASE).unwrap()
    }

    #[test]
    fn viewport_1000_by_800_gives_200_by_160_grid() {
        let f = field(1000, 800);
        assert_eq!(f.cols(), 200);
        assert_eq!(f.rows(), 160);
        assert_eq!(f.angles().len(), 32_000);
    }

    #[test]
    fn grid_dimensions_are_floored() {
        let f = field(1004, 809);
        assert_eq!(f.cols(), 200);
        assert_eq!(f.rows(), 161);
    }

    #[test]
    fn zero_cell_size_is_rejected() {
        let result = FlowField::new(100, 100, 0, CURVE, ZOOM, INITIAL_PHASE);
        assert!(matches!(result, Err(EngineError::InvalidParam { .. })));
    }

    #[test]
    fn viewport_smaller_than_a_cell_is_rejected() {
        let result = FlowField::new(4, 100, 5, CURVE, ZOOM, INITIAL_PHASE);
        assert!(matches!(
            result,
            Err(EngineError::InvalidDimensions {
                width: 4,
                height: 100
            })
        ));
        assert!(FlowField::new(0, 0, 5, CURVE, ZOOM, INITIAL_PHASE).is_err());
    }

    #[test]
    fn origin_cell_matches_closed_form() {
        // At x = y = 0: 1.01 * sin(1) * 1 * 2.1 - 0
        let f = field(50, 50);
        let expected = 1.01 * 1.0_f64.sin() * 2.1;
        assert!((f.angles()[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn initial_build_uses_sine_and_regeneration_uses_cosine() {
        let phase = 0.3;
        let sine = angle(7, 4, CURVE, ZOOM, phase, LeadingTerm::Sine);
        let cosine = angle(7, 4, CURVE, ZOOM, phase, LeadingTerm::Cosine);
        assert!((sine - cosine).abs() > 1e-3, "variants should differ");

        let mut f = FlowField::new(100, 100, 5, CURVE, ZOOM, phase).unwrap();
        assert!((f.angles()[4 * f.cols() + 7] - sine).abs() < 1e-12);
        f.regenerate();
        assert!((f.angles()[4 * f.cols() + 7] - cosine).abs() < 1e-12);
    }

    #[test]
    fn regenerate_advances_phase_after_using_it() {
        let mut f = field(40, 40);
        let before = f.phase();
        f.regenerate();
        assert!((f.phase() - (before + PHASE_STEP)).abs() < 1e-15);
        let expected = generate(f.cols(), f.rows(), CURVE, ZOOM, before, LeadingTerm::Cosine);
        assert_eq!(f.angles(), expected.as_slice());
    }

    #[test]
    fn phase_grows_without_wrapping() {
        let mut f = field(10, 10);
        for _ in 0..2_000 {
            f.regenerate();
        }
        assert!((f.phase() - (INITIAL_PHASE + 2_000.0 * PHASE_STEP)).abs() < 1e-9);
    }

    #[test]
    fn regenerate_preserves_length() {
        let mut f = field(333, 77);
        let len = f.angles().len();
        f.regenerate();
        assert_eq!(f.angles().len(), len);
        assert_eq!(len, f.cols() * f.rows());
    }

    #[test]
    fn resize_rebuilds_with_sine_variant_and_keeps_phase() {
        let mut f = field(100, 100);
        f.regenerate();
        f.regenerate();
        let phase = f.phase();
        f.resize(60, 30).unwrap();
        assert_eq!((f.cols(), f.rows()), (12, 6));
        assert_eq!(f.phase(), phase);
        let expected = generate(12, 6, CURVE, ZOOM, phase, LeadingTerm::Sine);
        assert_eq!(f.angles(), expected.as_slice());
    }

    #[test]
    fn resize_to_invalid_viewport_keeps_previous_grid() {
        let mut f = field(100, 100);
        assert!(f.resize(2, 2).is_err());
        assert_eq!((f.cols(), f.rows()), (20, 20));
    }

    #[test]
    fn angle_at_maps_pixels_to_cells() {
        let f = field(100, 100);
        let cols = f.cols();
        assert_eq!(f.angle_at(0.0, 0.0), f.angles()[0]);
        assert_eq!(f.angle_at(4.99, 4.99), f.angles()[0]);
        assert_eq!(f.angle_at(5.0, 0.0), f.angles()[1]);
        assert_eq!(f.angle_at(12.0, 27.0), f.angles()[5 * cols + 2]);
    }

    #[test]
    fn angle_at_clamps_positions_off_the_viewport() {
        let f = field(100, 50);
        let cols = f.cols();
        let last = f.angles().len() - 1;
        assert_eq!(f.angle_at(-3.0, -3.0), f.angles()[0]);
        assert_eq!(f.angle_at(1e9, 1e9), f.angles()[last]);
        assert_eq!(f.angle_at(-40.0, 12.0), f.angles()[2 * cols]);
        assert_eq!(f.angle_at(f64::NAN, f64::INFINITY), f.angles()[last - (cols - 1)]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn generate_is_deterministic(
                cols in 1_usize..40,
                rows in 1_usize..40,
                curve in -5.0_f64..5.0,
                zoom in 0.0_f64..1.0,
                phase in -100.0_f64..100.0,
            ) {
                for lead in [LeadingTerm::Sine, LeadingTerm::Cosine] {
                    let a = generate(cols, rows, curve, zoom, phase, lead);
                    let b = generate(cols, rows, curve, zoom, phase, lead);
                    prop_assert_eq!(a.len(), cols * rows);
                    for (va, vb) in a.iter().zip(b.iter()) {
                        prop_assert_eq!(va.to_bits(), vb.to_bits());
                    }
                }
            }

            #[test]
            fn angles_are_bounded_by_amplitude(
                x in 0_usize..1000,
                y in 0_usize..1000,
                curve in -5.0_f64..5.0,
                phase in -100.0_f64..100.0,
            ) {
                let bound = 1.01 * (curve.abs() + 1.0) + 1e-12;
                for lead in [LeadingTerm::Sine, LeadingTerm::Cosine] {
                    let a = angle(x, y, curve, 0.01, phase, lead);
                    prop_assert!(a.abs() <= bound, "angle {a} exceeds {bound}");
                }
            }

            #[test]
            fn angle_at_never_panics(x in -1e6_f64..1e6, y in -1e6_f64..1e6) {
                let f = FlowField::new(64, 48, 5, 2.1, 0.01, 1.0).unwrap();
                let a = f.angle_at(x, y);
                prop_assert!(f.angles().contains(&a));
            }
        }
    }
}
