//! Interactive hue/saturation/value picker.
//!
//! A session edits one entry: pointer drags over the saturation/value field
//! and the hue track, or typed hex, drive a live preview. Nothing reaches the
//! engine until [`PickerController::apply`]; [`PickerController::cancel`]
//! reverts the preview to the color the session opened with.

use crate::color::{hex_to_hsv, hsv_to_hex, normalize_hex, round_to, sanitize_hex, HexColor, Hsv, HEX_DIGITS};
use crate::config::{EngineConfig, PickerPrecision, DEFAULT_POPUP_MARGIN, DEFAULT_POPUP_OFFSET};
use crate::engine::PaletteEngine;
use crate::generator::ColorGenerator;
use crate::input::{KeyPress, MouseButton, PointerEvent};
use crate::palette::EntryId;
use kurbo::{Point, Rect, Size};

/// The two draggable picker widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerWidget {
    /// 1-D hue track, left to right is 0 to 360 degrees.
    HueTrack,
    /// 2-D field, saturation along x and value along inverted y.
    SvField,
}

/// Widget bounds in viewport coordinates, reported by the front end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerLayout {
    pub popup: Rect,
    pub field: Rect,
    pub hue_track: Rect,
}

/// How a closed session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerOutcome {
    Applied {
        id: EntryId,
        hex: HexColor,
        /// False when the engine saw no change (same color).
        committed: bool,
    },
    Cancelled {
        id: EntryId,
        restored: HexColor,
    },
}

/// What the host should do with a key event while the picker is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Handled by the picker; suppress default handling.
    Consumed,
    /// Not allowed in the hex field; suppress it.
    Suppressed,
    /// Let the host handle it normally.
    PassThrough,
}

/// A drag in progress. Bounds are captured when the gesture starts, and
/// moves are accepted anywhere until release.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragGesture {
    widget: PickerWidget,
    bounds: Rect,
}

/// State of one open edit.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerSession {
    entry_id: EntryId,
    committed: HexColor,
    /// HSV at open time, drawn as a marker on both widgets.
    footprint: Hsv,
    hue: f64,
    saturation: f64,
    value: f64,
    live: HexColor,
    /// Contents of the hex text field, sanitized, without `#`.
    text: String,
    anchor: Rect,
    layout: Option<PickerLayout>,
    drag: Option<DragGesture>,
}

impl PickerSession {
    fn new(entry_id: EntryId, current: HexColor, anchor: Rect) -> Self {
        let hsv = hex_to_hsv(current);
        Self {
            entry_id,
            committed: current,
            footprint: hsv,
            hue: hsv.h,
            saturation: hsv.s,
            value: hsv.v,
            live: current,
            text: current.to_bare(),
            anchor,
            layout: None,
            drag: None,
        }
    }

    pub fn entry_id(&self) -> EntryId {
        self.entry_id
    }

    /// Color the entry had when the session opened.
    pub fn committed_hex(&self) -> HexColor {
        self.committed
    }

    pub fn live_hex(&self) -> HexColor {
        self.live
    }

    pub fn hsv(&self) -> Hsv {
        Hsv::new(self.hue, self.saturation, self.value)
    }

    pub fn footprint(&self) -> Hsv {
        self.footprint
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn anchor(&self) -> Rect {
        self.anchor
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Hue cursor position along the track, in `[0, 1]`.
    pub fn hue_cursor_fraction(&self) -> f64 {
        (self.hue / 360.0).clamp(0.0, 1.0)
    }

    /// Field cursor position as fractions of width and height.
    pub fn field_cursor_fraction(&self) -> Point {
        Point::new(self.saturation, 1.0 - self.value)
    }

    /// Right-hand gradient stop of the saturation/value field.
    pub fn field_hue_hex(&self) -> HexColor {
        Hsv::pure_hue_hex(self.hue)
    }

    fn refresh_live(&mut self) {
        self.live = hsv_to_hex(self.hue, self.saturation, self.value);
        self.text = self.live.to_bare();
    }
}

/// Place the popup centered below `anchor`, clamped horizontally to stay
/// `margin` inside the viewport.
pub fn place_popup(anchor: Rect, popup: Size, viewport_width: f64, margin: f64, offset: f64) -> Point {
    let left = anchor.center().x - popup.width / 2.0;
    let max_left = viewport_width - popup.width - margin;
    Point::new(left.min(max_left).max(margin), anchor.y1 + offset)
}

fn map_hue(x: f64, track: Rect, precision: &PickerPrecision) -> f64 {
    let width = track.width();
    if width <= 0.0 {
        return 0.0;
    }
    let offset = (x - track.x0).clamp(0.0, width);
    round_to((offset / width * 360.0).clamp(0.0, 360.0), precision.hue_decimals)
}

fn map_sv(position: Point, field: Rect, precision: &PickerPrecision) -> (f64, f64) {
    let (width, height) = (field.width(), field.height());
    if width <= 0.0 || height <= 0.0 {
        return (0.0, 0.0);
    }
    let x = (position.x - field.x0).clamp(0.0, width);
    let y = (position.y - field.y0).clamp(0.0, height);
    let s = round_to((x / width).clamp(0.0, 1.0), precision.sv_decimals);
    let v = round_to((1.0 - y / height).clamp(0.0, 1.0), precision.sv_decimals);
    (s, v)
}

type PreviewCallback = Box<dyn FnMut(EntryId, HexColor)>;

/// Drives at most one [`PickerSession`] at a time.
pub struct PickerController {
    session: Option<PickerSession>,
    precision: PickerPrecision,
    popup_margin: f64,
    popup_offset: f64,
    on_preview: Option<PreviewCallback>,
}

impl Default for PickerController {
    fn default() -> Self {
        Self::new(PickerPrecision::default())
    }
}

impl std::fmt::Debug for PickerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickerController")
            .field("session", &self.session)
            .field("precision", &self.precision)
            .finish_non_exhaustive()
    }
}

impl PickerController {
    pub fn new(precision: PickerPrecision) -> Self {
        Self {
            session: None,
            precision,
            popup_margin: DEFAULT_POPUP_MARGIN,
            popup_offset: DEFAULT_POPUP_OFFSET,
            on_preview: None,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            popup_margin: config.popup_margin,
            popup_offset: config.popup_offset,
            ..Self::new(config.precision)
        }
    }

    /// Called with every live preview change, including the revert on cancel.
    pub fn set_preview_callback(&mut self, callback: impl FnMut(EntryId, HexColor) + 'static) {
        self.on_preview = Some(Box::new(callback));
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&PickerSession> {
        self.session.as_ref()
    }

    fn notify(&mut self) {
        if let (Some(session), Some(callback)) = (&self.session, self.on_preview.as_mut()) {
            callback(session.entry_id, session.live);
        }
    }

    /// Open a session for an entry. A session that is already open is
    /// cancelled first, and its outcome returned.
    pub fn open(&mut self, entry_id: EntryId, current: HexColor, anchor: Rect) -> Option<PickerOutcome> {
        let previous = self.cancel();
        log::debug!("Picker opened for {} at {}", entry_id, current);
        self.session = Some(PickerSession::new(entry_id, current, anchor));
        previous
    }

    /// Record where the front end drew the popup and its widgets.
    pub fn set_layout(&mut self, layout: PickerLayout) {
        if let Some(session) = self.session.as_mut() {
            session.layout = Some(layout);
        }
    }

    /// Popup origin for a popup of `size` in a viewport `viewport_width` wide.
    pub fn popup_origin(&self, size: Size, viewport_width: f64) -> Option<Point> {
        let session = self.session.as_ref()?;
        Some(place_popup(
            session.anchor,
            size,
            viewport_width,
            self.popup_margin,
            self.popup_offset,
        ))
    }

    /// Set the hue from a pointer x-position over `track`.
    pub fn drag_hue(&mut self, x: f64, track: Rect) -> Option<HexColor> {
        let hue = map_hue(x, track, &self.precision);
        let session = self.session.as_mut()?;
        session.hue = hue;
        session.refresh_live();
        let live = session.live;
        self.notify();
        Some(live)
    }

    /// Set saturation and value from a pointer position over `field`.
    pub fn drag_field(&mut self, position: Point, field: Rect) -> Option<HexColor> {
        let (s, v) = map_sv(position, field, &self.precision);
        let session = self.session.as_mut()?;
        session.saturation = s;
        session.value = v;
        session.refresh_live();
        let live = session.live;
        self.notify();
        Some(live)
    }

    /// Start a drag gesture on a widget and apply the initial position.
    pub fn begin_drag(&mut self, widget: PickerWidget, position: Point, bounds: Rect) -> Option<HexColor> {
        self.session.as_mut()?.drag = Some(DragGesture { widget, bounds });
        self.drag_to(position)
    }

    /// Continue the current gesture. Positions outside the widget clamp to
    /// its edges.
    pub fn drag_to(&mut self, position: Point) -> Option<HexColor> {
        let gesture = self.session.as_ref()?.drag?;
        match gesture.widget {
            PickerWidget::HueTrack => self.drag_hue(position.x, gesture.bounds),
            PickerWidget::SvField => self.drag_field(position, gesture.bounds),
        }
    }

    /// Release the current gesture, if any.
    pub fn end_drag(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.drag = None;
        }
    }

    /// Route a pointer event using the reported layout.
    ///
    /// A press outside the popup cancels the session and returns its
    /// outcome.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> Option<PickerOutcome> {
        match *event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => {
                let layout = self.session.as_ref()?.layout?;
                if layout.field.contains(position) {
                    self.begin_drag(PickerWidget::SvField, position, layout.field);
                } else if layout.hue_track.contains(position) {
                    self.begin_drag(PickerWidget::HueTrack, position, layout.hue_track);
                } else if !layout.popup.contains(position) {
                    return self.cancel();
                }
                None
            }
            PointerEvent::Move { position } => {
                self.drag_to(position);
                None
            }
            PointerEvent::Up { .. } => {
                self.end_drag();
                None
            }
            PointerEvent::Down { .. } => None,
        }
    }

    /// Update from the hex text field. Partial input previews immediately,
    /// padded with zeros; a complete value also moves the cursors.
    pub fn type_hex(&mut self, input: &str) -> Option<HexColor> {
        let precision = self.precision;
        let session = self.session.as_mut()?;
        let sanitized = sanitize_hex(input);
        session.live = normalize_hex(&sanitized);

        if sanitized.len() == HEX_DIGITS {
            let hsv = hex_to_hsv(session.live);
            session.hue = round_to(hsv.h.clamp(0.0, 360.0), precision.hue_decimals);
            session.saturation = round_to(hsv.s.clamp(0.0, 1.0), precision.sv_decimals);
            session.value = round_to(hsv.v.clamp(0.0, 1.0), precision.sv_decimals);
        }
        session.text = sanitized;

        let live = session.live;
        self.notify();
        Some(live)
    }

    /// Commit the live color to the engine and close.
    pub fn apply<G: ColorGenerator>(&mut self, engine: &mut PaletteEngine<G>) -> Option<PickerOutcome> {
        let session = self.session.take()?;
        let committed = engine.set_entry_color(session.entry_id, session.live);
        log::debug!("Picker applied {} (changed: {})", session.live, committed);
        Some(PickerOutcome::Applied {
            id: session.entry_id,
            hex: session.live,
            committed,
        })
    }

    /// Revert the preview to the committed color and close without touching
    /// the engine.
    pub fn cancel(&mut self) -> Option<PickerOutcome> {
        let session = self.session.as_mut()?;
        session.drag = None;
        session.live = session.committed;
        session.text = session.committed.to_bare();
        self.notify();

        let session = self.session.take()?;
        log::debug!("Picker cancelled, restored {}", session.committed);
        Some(PickerOutcome::Cancelled {
            id: session.entry_id,
            restored: session.committed,
        })
    }

    /// Enter applies, Escape cancels, and non-hex characters are kept out of
    /// the text field.
    pub fn handle_key<G: ColorGenerator>(
        &mut self,
        key: &KeyPress,
        engine: &mut PaletteEngine<G>,
    ) -> KeyDisposition {
        if !self.is_open() {
            return KeyDisposition::PassThrough;
        }
        if key.is("Enter") {
            self.apply(engine);
            return KeyDisposition::Consumed;
        }
        if key.is("Escape") {
            self.cancel();
            return KeyDisposition::Consumed;
        }
        if key.modifiers.ctrl || key.modifiers.meta {
            return KeyDisposition::PassThrough;
        }
        match key.character() {
            Some(c) if !c.is_ascii_hexdigit() => KeyDisposition::Suppressed,
            _ => KeyDisposition::PassThrough,
        }
    }
}
