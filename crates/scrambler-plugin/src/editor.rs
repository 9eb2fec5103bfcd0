//! Toolkit-independent control surface.
//!
//! The editor owns layout and interaction; drawing is delegated to a
//! [`KnobPainter`] supplied by whatever GUI toolkit hosts it. The parameter
//! model never sees any of these types.
//!
//! # Layout
//!
//! For the default 600 x 400 window:
//!
//! ```text
//! +--------------------------------------------------+
//! |            scrambler by KKL          [ preset v ]|  60 px header
//! |  Room Size  Damping  Wet Level  Dry Level  Width |  20 px labels
//! |    (o)        (o)       (o)        (o)      (o)  |  knobs
//! |    0.50       0.50      0.33       0.40     1.00 |  20 px value boxes
//! +--------------------------------------------------+
//! ```

use crate::params::{ReverbParam, ReverbParameters};
use crate::preset::Preset;
use std::f32::consts::PI;

/// Default editor width in pixels.
pub const DEFAULT_WIDTH: f32 = 600.0;
/// Default editor height in pixels.
pub const DEFAULT_HEIGHT: f32 = 400.0;
/// Title drawn across the top of the editor.
pub const TITLE: &str = "scrambler by KKL";

const OUTER_MARGIN: f32 = 20.0;
const HEADER_HEIGHT: f32 = 60.0;
const TITLE_HEIGHT: f32 = 40.0;
const PRESET_BOX_WIDTH: f32 = 150.0;
const PRESET_BOX_PADDING: f32 = 5.0;
const INNER_MARGIN: f32 = 10.0;
const KNOB_PADDING: f32 = 5.0;
const LABEL_HEIGHT: f32 = 20.0;
const VALUE_BOX_WIDTH: f32 = 90.0;
const VALUE_BOX_HEIGHT: f32 = 20.0;

/// Axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width, never negative.
    pub width: f32,
    /// Height, never negative.
    pub height: f32,
}

impl Rect {
    /// Create a rectangle; negative sizes are clamped to zero.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Shrink by `amount` on every side.
    pub fn reduced(self, amount: f32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            self.width - 2.0 * amount,
            self.height - 2.0 * amount,
        )
    }

    /// Cut a strip of `height` off the top and return it.
    pub fn remove_from_top(&mut self, height: f32) -> Self {
        let height = height.clamp(0.0, self.height);
        let strip = Self::new(self.x, self.y, self.width, height);
        self.y += height;
        self.height -= height;
        strip
    }

    /// Cut a strip of `height` off the bottom and return it.
    pub fn remove_from_bottom(&mut self, height: f32) -> Self {
        let height = height.clamp(0.0, self.height);
        self.height -= height;
        Self::new(self.x, self.y + self.height, self.width, height)
    }

    /// Cut a strip of `width` off the left and return it.
    pub fn remove_from_left(&mut self, width: f32) -> Self {
        let width = width.clamp(0.0, self.width);
        let strip = Self::new(self.x, self.y, width, self.height);
        self.x += width;
        self.width -= width;
        strip
    }

    /// Cut a strip of `width` off the right and return it.
    pub fn remove_from_right(&mut self, width: f32) -> Self {
        let width = width.clamp(0.0, self.width);
        self.width -= width;
        Self::new(self.x + self.width, self.y, width, self.height)
    }

    /// Centre point.
    pub fn centre(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Whether `(x, y)` lies inside.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Everything needed to draw one rotary knob.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobGeometry {
    /// Area the knob is drawn in.
    pub bounds: Rect,
    /// Knob centre.
    pub centre: (f32, f32),
    /// Outline radius, `0.4 * min(width, height)`.
    pub radius: f32,
    /// Normalized position in `[0, 1]`.
    pub value: f32,
    /// Angle of the minimum position, radians clockwise from 12 o'clock.
    pub start_angle: f32,
    /// Angle of the maximum position.
    pub end_angle: f32,
    /// Angle of the current value; the value arc runs from `start_angle` to here.
    pub value_angle: f32,
    /// Pointer length, `0.8 * radius`, measured inward from the rim.
    pub pointer_length: f32,
    /// Pointer (and value arc) stroke width.
    pub pointer_thickness: f32,
}

impl KnobGeometry {
    /// Geometry for a knob at `value` (clamped to `[0, 1]`).
    pub fn new(bounds: Rect, value: f32, start_angle: f32, end_angle: f32) -> Self {
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        let radius = bounds.width.min(bounds.height) * 0.4;
        Self {
            bounds,
            centre: bounds.centre(),
            radius,
            value,
            start_angle,
            end_angle,
            value_angle: start_angle + value * (end_angle - start_angle),
            pointer_length: radius * 0.8,
            pointer_thickness: 3.0,
        }
    }

    /// Pointer segment as `((x0, y0), (x1, y1))`, rim first.
    pub fn pointer(&self) -> ((f32, f32), (f32, f32)) {
        let (cx, cy) = self.centre;
        let (sin, cos) = self.value_angle.sin_cos();
        let at = |r: f32| (cx + r * sin, cy - r * cos);
        (at(self.radius), at(self.radius - self.pointer_length))
    }
}

/// Drawing backend for the control surface.
pub trait KnobPainter {
    /// Draw a rotary knob: outline circle, value arc and pointer.
    fn draw_knob(&mut self, knob: &KnobGeometry);

    /// Draw centred text. Backends that only draw knobs can ignore this.
    fn draw_text(&mut self, bounds: Rect, text: &str) {
        let _ = (bounds, text);
    }
}

/// Layout of one knob column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobLayout {
    /// Parameter this column controls.
    pub param: ReverbParam,
    /// Label row above the knob.
    pub label: Rect,
    /// Knob area.
    pub knob: Rect,
    /// Value text box below the knob.
    pub value_box: Rect,
}

/// The plugin editor: five knobs and a preset menu over shared parameters.
///
/// # Example
///
/// ```rust
/// use scrambler_plugin::ReverbParameters;
/// use scrambler_plugin::editor::{ControlSurface, KnobGeometry, KnobPainter};
///
/// struct Count(usize);
/// impl KnobPainter for Count {
///     fn draw_knob(&mut self, _knob: &KnobGeometry) {
///         self.0 += 1;
///     }
/// }
///
/// let surface = ControlSurface::new(ReverbParameters::new());
/// let mut painter = Count(0);
/// surface.render(&mut painter);
/// assert_eq!(painter.0, 5);
/// ```
#[derive(Debug, Clone)]
pub struct ControlSurface {
    params: ReverbParameters,
    width: f32,
    height: f32,
    start_angle: f32,
    end_angle: f32,
    selected_preset: Preset,
}

impl ControlSurface {
    /// Editor at the default size, sweeping each knob from 7 o'clock to
    /// 5 o'clock.
    pub fn new(params: ReverbParameters) -> Self {
        Self {
            params,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            start_angle: PI * 1.2,
            end_angle: PI * 2.8,
            selected_preset: Preset::Default,
        }
    }

    /// Parameters this surface edits.
    pub fn params(&self) -> &ReverbParameters {
        &self.params
    }

    /// Resize the editor.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// Current `(width, height)`.
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Change the knob sweep.
    pub fn set_rotary_range(&mut self, start_angle: f32, end_angle: f32) {
        self.start_angle = start_angle;
        self.end_angle = end_angle;
    }

    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Area of the title text.
    pub fn title_bounds(&self) -> Rect {
        self.bounds().remove_from_top(TITLE_HEIGHT)
    }

    /// Area of the preset menu.
    pub fn preset_box_bounds(&self) -> Rect {
        let mut area = self.bounds().reduced(OUTER_MARGIN);
        let mut header = area.remove_from_top(HEADER_HEIGHT);
        header.remove_from_right(PRESET_BOX_WIDTH).reduced(PRESET_BOX_PADDING)
    }

    /// Column layout for every knob, in parameter order.
    pub fn layout(&self) -> [KnobLayout; ReverbParam::COUNT] {
        let mut area = self.bounds().reduced(OUTER_MARGIN);
        area.remove_from_top(HEADER_HEIGHT);
        let mut knobs = area.reduced(INNER_MARGIN);
        let column_width = (knobs.width / ReverbParam::COUNT as f32).floor();

        ReverbParam::ALL.map(|param| {
            let mut column = knobs.remove_from_left(column_width).reduced(KNOB_PADDING);
            let label = column.remove_from_top(LABEL_HEIGHT);
            let mut value_row = column.remove_from_bottom(VALUE_BOX_HEIGHT);
            let inset = ((value_row.width - VALUE_BOX_WIDTH) * 0.5).max(0.0);
            value_row.remove_from_left(inset);
            value_row.remove_from_right(inset);
            KnobLayout {
                param,
                label,
                knob: column,
                value_box: value_row,
            }
        })
    }

    /// Geometry of one knob at the parameter's current value.
    pub fn knob_geometry(&self, param: ReverbParam) -> KnobGeometry {
        let layout = self.layout()[param.index()];
        let value = param.descriptor().normalize(self.params.get(param));
        KnobGeometry::new(layout.knob, value, self.start_angle, self.end_angle)
    }

    /// Draw the whole editor from current parameter values.
    pub fn render(&self, painter: &mut dyn KnobPainter) {
        painter.draw_text(self.title_bounds(), TITLE);
        painter.draw_text(self.preset_box_bounds(), self.selected_preset.name());

        for column in self.layout() {
            let desc = column.param.descriptor();
            let value = self.params.get(column.param);
            painter.draw_text(column.label, desc.name);
            painter.draw_knob(&KnobGeometry::new(
                column.knob,
                desc.normalize(value),
                self.start_angle,
                self.end_angle,
            ));
            painter.draw_text(column.value_box, &desc.format_value(value).to_string());
        }
    }

    /// Entries of the preset menu as `(menu id, name)`.
    pub fn preset_menu(&self) -> impl Iterator<Item = (u32, &'static str)> {
        Preset::ALL.into_iter().map(|p| (p.menu_id(), p.name()))
    }

    /// Apply the preset at a 1-based menu id. Unknown ids select Default.
    pub fn select_preset(&mut self, menu_id: u32) -> Preset {
        let preset = Preset::from_menu_id(menu_id).unwrap_or_default();
        self.params.apply_preset(preset);
        self.selected_preset = preset;
        tracing::debug!(preset = preset.name(), menu_id, "preset selected");
        preset
    }

    /// Preset most recently chosen from the menu.
    pub fn selected_preset(&self) -> Preset {
        self.selected_preset
    }

    /// Set a parameter from value-box text. Returns `false` if the text is
    /// not a number, leaving the value unchanged.
    pub fn enter_text(&self, param: ReverbParam, text: &str) -> bool {
        match param.descriptor().parse_value(text) {
            Some(value) => {
                self.params.set(param, value);
                true
            }
            None => false,
        }
    }

    /// Vertical drag on a knob: `delta_px` pixels up raises the value by
    /// `delta_px / 250` of its range.
    pub fn drag(&self, param: ReverbParam, delta_px: f32) {
        let desc = param.descriptor();
        let normalized = desc.normalize(self.params.get(param)) + delta_px / 250.0;
        self.params.set(param, desc.denormalize(normalized));
    }

    /// Parameter whose knob contains `(x, y)`, if any.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<ReverbParam> {
        self.layout()
            .into_iter()
            .find(|column| column.knob.contains(x, y))
            .map(|column| column.param)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        knobs: Vec<KnobGeometry>,
        texts: Vec<(Rect, String)>,
    }

    impl KnobPainter for Recorder {
        fn draw_knob(&mut self, knob: &KnobGeometry) {
            self.knobs.push(*knob);
        }

        fn draw_text(&mut self, bounds: Rect, text: &str) {
            self.texts.push((bounds, text.to_string()));
        }
    }

    #[test]
    fn knob_geometry_formulas() {
        let knob = KnobGeometry::new(Rect::new(10.0, 20.0, 100.0, 80.0), 0.25, 0.0, 4.0);
        assert!((knob.radius - 32.0).abs() < 1e-5);
        assert!((knob.value_angle - 1.0).abs() < 1e-6);
        assert!((knob.pointer_length - 25.6).abs() < 1e-5);
        assert_eq!(knob.pointer_thickness, 3.0);
        assert_eq!(knob.centre, (60.0, 60.0));
    }

    #[test]
    fn knob_pointer_at_twelve_oclock() {
        let knob = KnobGeometry::new(Rect::new(0.0, 0.0, 100.0, 100.0), 0.0, 0.0, 1.0);
        let ((x0, y0), (x1, y1)) = knob.pointer();
        assert!((x0 - 50.0).abs() < 1e-5 && (y0 - 10.0).abs() < 1e-5);
        assert!((x1 - 50.0).abs() < 1e-5 && (y1 - 42.0).abs() < 1e-4);
    }

    #[test]
    fn default_layout() {
        let surface = ControlSurface::new(ReverbParameters::new());

        assert_eq!(surface.preset_box_bounds(), Rect::new(435.0, 25.0, 140.0, 50.0));

        // 600 - 2*20 - 2*10 = 540 wide, 108 per column.
        let layout = surface.layout();
        assert_eq!(layout[0].label, Rect::new(35.0, 95.0, 98.0, 20.0));
        assert_eq!(layout[0].knob, Rect::new(35.0, 115.0, 98.0, 230.0));
        assert_eq!(layout[0].value_box, Rect::new(39.0, 345.0, 90.0, 20.0));
        assert_eq!(layout[4].label.x, 35.0 + 4.0 * 108.0);
        for (column, param) in layout.iter().zip(ReverbParam::ALL) {
            assert_eq!(column.param, param);
        }
    }

    #[test]
    fn render_draws_every_control() {
        let params = ReverbParameters::new();
        params.set(ReverbParam::Damping, 0.75);
        let surface = ControlSurface::new(params);

        let mut recorder = Recorder::default();
        surface.render(&mut recorder);

        assert_eq!(recorder.knobs.len(), 5);
        assert_eq!(recorder.knobs[1].value, 0.75);
        assert_eq!(recorder.knobs[4].value, 1.0);

        let texts: Vec<&str> = recorder.texts.iter().map(|(_, t)| t.as_str()).collect();
        assert!(texts.contains(&TITLE));
        assert!(texts.contains(&"Default"));
        assert!(texts.contains(&"Wet Level"));
        assert!(texts.contains(&"0.75"));
        assert!(texts.contains(&"0.33"));
    }

    #[test]
    fn select_preset_by_menu_id() {
        let params = ReverbParameters::new();
        let mut surface = ControlSurface::new(params.clone());

        assert_eq!(surface.select_preset(4), Preset::Cathedral);
        assert_eq!(params.snapshot(), Preset::Cathedral.settings());
        assert_eq!(surface.selected_preset(), Preset::Cathedral);

        assert_eq!(surface.select_preset(99), Preset::Default);
        assert_eq!(params.snapshot(), Preset::Default.settings());
    }

    #[test]
    fn preset_menu_entries() {
        let surface = ControlSurface::new(ReverbParameters::new());
        let menu: Vec<_> = surface.preset_menu().collect();
        assert_eq!(
            menu,
            [(1, "Default"), (2, "Small Room"), (3, "Large Hall"), (4, "Cathedral")]
        );
    }

    #[test]
    fn text_entry_and_drag() {
        let params = ReverbParameters::new();
        let surface = ControlSurface::new(params.clone());

        assert!(surface.enter_text(ReverbParam::RoomSize, "0.9"));
        assert_eq!(params.get(ReverbParam::RoomSize), 0.9);
        assert!(!surface.enter_text(ReverbParam::RoomSize, "huge"));
        assert_eq!(params.get(ReverbParam::RoomSize), 0.9);

        surface.drag(ReverbParam::RoomSize, 500.0);
        assert_eq!(params.get(ReverbParam::RoomSize), 1.0);
        surface.drag(ReverbParam::RoomSize, -125.0);
        assert!((params.get(ReverbParam::RoomSize) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn hit_test_finds_columns() {
        let surface = ControlSurface::new(ReverbParameters::new());
        assert_eq!(surface.hit_test(80.0, 200.0), Some(ReverbParam::RoomSize));
        assert_eq!(surface.hit_test(520.0, 200.0), Some(ReverbParam::Width));
        assert_eq!(surface.hit_test(5.0, 5.0), None);
    }

    #[test]
    fn tiny_window_does_not_go_negative() {
        let mut surface = ControlSurface::new(ReverbParameters::new());
        surface.set_size(30.0, 30.0);
        for column in surface.layout() {
            assert!(column.knob.width >= 0.0 && column.knob.height >= 0.0);
        }
        let mut recorder = Recorder::default();
        surface.render(&mut recorder);
        assert!(recorder.knobs.iter().all(|k| k.radius >= 0.0));
    }
}
