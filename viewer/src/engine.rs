use wasm_bindgen::JsValue;
use web_sys::HtmlElement;

use crate::config::ViewerConfig;
use crate::consts::{MIN_PINCH_DISTANCE_PX, ZOOM_EPSILON};
use crate::geometry::{Point, Size, Transform, screen_to_image_percent, translation_for_anchor};
use crate::input::{Button, GestureState, InputEvent, Key, KeyCommand, PinchSession, WheelDelta};
use crate::transform::{GeometryError, TransformState};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Cursor shown over the stage while idle.
pub const CURSOR_IDLE: &str = "grab";

/// Cursor shown over the stage while dragging.
pub const CURSOR_DRAGGING: &str = "grabbing";

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The committed transform changed; the image must be redrawn.
    RenderNeeded,
    /// The stage cursor should change.
    SetCursor(String),
    /// The committed zoom changed; status text and button enablement are stale.
    ZoomChanged { percent: u32 },
}

/// Engine state and logic that never touches the image element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// The transform state only exists once both the image's natural size and the
/// viewport size are known; until then every handler is a no-op.
pub struct EngineCore {
    config: ViewerConfig,
    state: Option<TransformState>,
    pub input: GestureState,
    image: Size,
    viewport: Size,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl EngineCore {
    /// Create an engine with no geometry. An invalid `config` is replaced by
    /// the defaults.
    #[must_use]
    pub fn new(config: ViewerConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("invalid viewer config, using defaults: {err}");
                ViewerConfig::default()
            }
        };
        Self { config, state: None, input: GestureState::Idle, image: Size::default(), viewport: Size::default() }
    }

    // --- Geometry inputs ---

    /// Build the transform state for a measured image and viewport.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if either size is not measurable; the
    /// engine then stays uninitialized.
    pub fn initialize(&mut self, image: Size, viewport: Size) -> Result<Transform, GeometryError> {
        self.image = image;
        self.viewport = viewport;
        let state = TransformState::new(self.config, image, viewport)?;
        let transform = state.transform();
        log::debug!(
            "viewer initialized: image {}x{}, viewport {}x{}, cover scale {}",
            image.width,
            image.height,
            viewport.width,
            viewport.height,
            state.initial_scale()
        );
        self.state = Some(state);
        self.input = GestureState::Idle;
        Ok(transform)
    }

    /// Record the image's natural size once it has loaded.
    pub fn set_image_size(&mut self, image: Size) -> Vec<Action> {
        self.image = image;
        self.try_initialize()
    }

    /// Recompute everything for a new viewport size and return to the cover view.
    ///
    /// Any gesture in progress is dropped; its anchors refer to the old layout.
    pub fn on_viewport_resize(&mut self, viewport: Size) -> Vec<Action> {
        self.viewport = viewport;
        let Some(state) = self.state.as_mut() else {
            return self.try_initialize();
        };
        if let Err(err) = state.recompute_initial_scale(viewport, self.image) {
            log::warn!("ignoring resize: {err}");
            return Vec::new();
        }
        state.reset();
        self.input = GestureState::Idle;
        log::debug!("viewport resized to {}x{}", viewport.width, viewport.height);
        vec![Action::RenderNeeded, Action::ZoomChanged { percent: state.zoom_percent_of_initial() }]
    }

    fn try_initialize(&mut self) -> Vec<Action> {
        if !self.image.is_measured() || !self.viewport.is_measured() {
            log::debug!("viewer waiting for geometry");
            return Vec::new();
        }
        match self.initialize(self.image, self.viewport) {
            Ok(_) => {
                let percent = self.zoom_percent_of_initial().unwrap_or(100);
                vec![Action::RenderNeeded, Action::ZoomChanged { percent }]
            }
            Err(err) => {
                log::warn!("viewer not initialized: {err}");
                Vec::new()
            }
        }
    }

    // --- Input events ---

    /// Dispatch a normalized host event.
    pub fn handle(&mut self, event: InputEvent) -> Vec<Action> {
        match event {
            InputEvent::PointerDown { position, button } => self.on_pointer_down(position, button),
            InputEvent::PointerMove { position } => self.on_drag_move(position),
            InputEvent::PointerUp { position } => self.on_drag_end(position),
            InputEvent::TouchStart { touches } => self.on_touch_start(&touches),
            InputEvent::TouchMove { touches } => self.on_touch_move(&touches),
            InputEvent::TouchEnd { touches } => self.on_touch_end(&touches),
            InputEvent::Wheel { position, delta } => self.on_wheel(position, delta),
            InputEvent::Key(key) => self.on_key_down(&key),
            InputEvent::Resize(viewport) => self.on_viewport_resize(viewport),
        }
    }

    /// Mouse-down: only the primary button grabs the image.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        self.on_drag_start(screen_pt)
    }

    /// Start dragging, anchored to the grabbed point.
    pub fn on_drag_start(&mut self, screen_pt: Point) -> Vec<Action> {
        let Some(state) = self.state.as_ref() else {
            return Vec::new();
        };
        if self.input.is_pinching() {
            return Vec::new();
        }
        let t = state.transform();
        let anchor = Point::new(screen_pt.x - t.translate_x, screen_pt.y - t.translate_y);
        self.input = GestureState::Dragging { anchor };
        vec![Action::SetCursor(CURSOR_DRAGGING.to_owned())]
    }

    /// Move the image so the grabbed point follows the pointer.
    pub fn on_drag_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let GestureState::Dragging { anchor } = self.input else {
            return Vec::new();
        };
        let Some(zoom) = self.current_transform().map(|t| t.zoom) else {
            return Vec::new();
        };
        self.commit(zoom, screen_pt.x - anchor.x, screen_pt.y - anchor.y)
    }

    /// Stop dragging. There is no inertia.
    pub fn on_drag_end(&mut self, _screen_pt: Point) -> Vec<Action> {
        if !self.input.is_dragging() {
            return Vec::new();
        }
        self.input = GestureState::Idle;
        vec![Action::SetCursor(CURSOR_IDLE.to_owned())]
    }

    /// Start a pinch, replacing any drag in progress.
    pub fn on_pinch_start(&mut self, touches: [Point; 2]) -> Vec<Action> {
        let Some(state) = self.state.as_ref() else {
            return Vec::new();
        };
        let [a, b] = touches;
        let center = a.midpoint(b);
        let t = state.transform();
        let Some(percent) = screen_to_image_percent(center, t, state.viewport(), state.image()) else {
            return Vec::new();
        };
        let session = PinchSession {
            initial_center_screen: center,
            initial_image_percent: percent,
            initial_zoom: t.zoom,
            initial_distance: a.distance(b),
        };
        log::debug!("pinch start at ({}, {}), distance {}", center.x, center.y, session.initial_distance);
        self.input = GestureState::Pinching(session);
        Vec::new()
    }

    /// Scale by the change in finger separation, keeping the image point that
    /// was under the starting midpoint pinned to that screen position.
    pub fn on_pinch_move(&mut self, touches: [Point; 2]) -> Vec<Action> {
        let GestureState::Pinching(mut session) = self.input else {
            return Vec::new();
        };
        let Some(state) = self.state.as_ref() else {
            return Vec::new();
        };
        let [a, b] = touches;
        let distance = a.distance(b);
        if session.initial_distance <= MIN_PINCH_DISTANCE_PX {
            if distance > MIN_PINCH_DISTANCE_PX {
                session.initial_distance = distance;
                session.initial_zoom = state.transform().zoom;
                self.input = GestureState::Pinching(session);
            }
            return Vec::new();
        }

        let zoom = state.clamp_zoom(session.initial_zoom * (distance / session.initial_distance));
        let (tx, ty) = translation_for_anchor(
            session.initial_image_percent,
            session.initial_center_screen,
            zoom,
            state.viewport(),
            state.image(),
        );
        self.commit(zoom, tx, ty)
    }

    /// End the pinch.
    pub fn on_pinch_end(&mut self) -> Vec<Action> {
        if self.input.is_pinching() {
            log::debug!("pinch end");
            self.input = GestureState::Idle;
        }
        Vec::new()
    }

    /// A finger went down; `touches` are all active touches.
    pub fn on_touch_start(&mut self, touches: &[Point]) -> Vec<Action> {
        match touches {
            [] => Vec::new(),
            [only] if self.input.is_idle() => self.on_drag_start(*only),
            [_] => Vec::new(),
            [first, second, ..] if !self.input.is_pinching() => self.on_pinch_start([*first, *second]),
            _ => Vec::new(),
        }
    }

    /// Fingers moved; `touches` are all active touches.
    pub fn on_touch_move(&mut self, touches: &[Point]) -> Vec<Action> {
        match (self.input, touches) {
            (GestureState::Dragging { .. }, [first, ..]) => self.on_drag_move(*first),
            (GestureState::Pinching(_), [first, second, ..]) => self.on_pinch_move([*first, *second]),
            _ => Vec::new(),
        }
    }

    /// A finger lifted; `remaining` are the touches still down.
    ///
    /// A pinch that drops to one finger ends outright rather than turning
    /// into a drag with stale anchors. With two or more fingers left the pinch
    /// restarts from the new leading pair at the committed transform, since
    /// the lifted finger may have been one of the pair being tracked.
    pub fn on_touch_end(&mut self, remaining: &[Point]) -> Vec<Action> {
        match (self.input, remaining) {
            (GestureState::Pinching(_), [first, second, ..]) => self.on_pinch_start([*first, *second]),
            (GestureState::Pinching(_), _) => self.on_pinch_end(),
            (GestureState::Dragging { .. }, []) => self.on_drag_end(Point::new(0.0, 0.0)),
            _ => Vec::new(),
        }
    }

    /// Wheel down zooms out, wheel up zooms in, one step per event, anchored
    /// at the pointer.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) -> Vec<Action> {
        let Some(step) = self.state.as_ref().map(TransformState::zoom_step) else {
            return Vec::new();
        };
        if delta.dy > 0.0 {
            self.zoom_to_point(screen_pt, -step)
        } else if delta.dy < 0.0 {
            self.zoom_to_point(screen_pt, step)
        } else {
            Vec::new()
        }
    }

    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        match key.command() {
            Some(KeyCommand::ZoomIn) => self.zoom_in(),
            Some(KeyCommand::ZoomOut) => self.zoom_out(),
            Some(KeyCommand::Reset) => self.reset(),
            Some(KeyCommand::Pan { dx, dy }) => {
                let step = self.config.key_pan_step;
                self.pan_by(dx * step, dy * step)
            }
            None => Vec::new(),
        }
    }

    // --- Zoom operations ---

    /// Change zoom by `delta_zoom` while keeping the image point under
    /// `screen_pt` stationary.
    ///
    /// No-op when the clamped zoom equals the current zoom. Near the viewport
    /// edges the bounds clamp may move the anchored point.
    pub fn zoom_to_point(&mut self, screen_pt: Point, delta_zoom: f64) -> Vec<Action> {
        let Some(state) = self.state.as_ref() else {
            return Vec::new();
        };
        let t = state.transform();
        let Some(percent) = screen_to_image_percent(screen_pt, t, state.viewport(), state.image()) else {
            return Vec::new();
        };
        let zoom = state.clamp_zoom(t.zoom + delta_zoom);
        if (zoom - t.zoom).abs() < ZOOM_EPSILON {
            return Vec::new();
        }
        let (tx, ty) = translation_for_anchor(percent, screen_pt, zoom, state.viewport(), state.image());
        self.commit(zoom, tx, ty)
    }

    /// Zoom in one step about the viewport center.
    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.zoom_about_center(1.0)
    }

    /// Zoom out one step about the viewport center.
    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.zoom_about_center(-1.0)
    }

    fn zoom_about_center(&mut self, direction: f64) -> Vec<Action> {
        let Some(state) = self.state.as_ref() else {
            return Vec::new();
        };
        let center = state.viewport().center();
        let delta = direction * state.zoom_step();
        self.zoom_to_point(center, delta)
    }

    /// Return to the cover view, centered.
    pub fn reset(&mut self) -> Vec<Action> {
        let Some(zoom) = self.state.as_ref().map(TransformState::initial_scale) else {
            return Vec::new();
        };
        self.commit(zoom, 0.0, 0.0)
    }

    /// Translate by a screen-space delta at the current zoom.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> Vec<Action> {
        let Some(t) = self.current_transform() else {
            return Vec::new();
        };
        self.commit(t.zoom, t.translate_x + dx, t.translate_y + dy)
    }

    fn commit(&mut self, zoom: f64, translate_x: f64, translate_y: f64) -> Vec<Action> {
        let Some(state) = self.state.as_mut() else {
            return Vec::new();
        };
        let before = state.transform();
        let after = state.apply_transform(zoom, translate_x, translate_y);
        if before == after {
            return Vec::new();
        }
        let mut actions = vec![Action::RenderNeeded];
        if (before.zoom - after.zoom).abs() >= ZOOM_EPSILON {
            actions.push(Action::ZoomChanged { percent: state.zoom_percent_of_initial() });
        }
        actions
    }

    // --- Queries ---

    /// The committed transform, once geometry is known.
    #[must_use]
    pub fn current_transform(&self) -> Option<Transform> {
        self.state.as_ref().map(TransformState::transform)
    }

    /// Committed zoom as a whole percentage of the cover scale.
    #[must_use]
    pub fn zoom_percent_of_initial(&self) -> Option<u32> {
        self.state.as_ref().map(TransformState::zoom_percent_of_initial)
    }

    #[must_use]
    pub fn can_zoom_in(&self) -> bool {
        self.state.as_ref().is_some_and(TransformState::can_zoom_in)
    }

    #[must_use]
    pub fn can_zoom_out(&self) -> bool {
        self.state.as_ref().is_some_and(TransformState::can_zoom_out)
    }

    /// Whether geometry is known and input is being handled.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state.is_some()
    }

    #[must_use]
    pub fn gesture(&self) -> GestureState {
        self.input
    }
}

/// CSS `transform` value for an image positioned with its center at the
/// viewport center (`left: 50%; top: 50%`) at its natural size.
#[must_use]
pub fn transform_css(t: Transform) -> String {
    format!(
        "translate(-50%, -50%) translate({:.3}px, {:.3}px) scale({:.6})",
        t.translate_x, t.translate_y, t.zoom
    )
}

/// The full viewer engine. Wraps `EngineCore` and owns the image element.
pub struct Engine {
    element: HtmlElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given image element.
    #[must_use]
    pub fn new(element: HtmlElement, config: ViewerConfig) -> Self {
        Self { element, core: EngineCore::new(config) }
    }

    // --- Delegated geometry inputs ---

    pub fn set_image_size(&mut self, image: Size) -> Vec<Action> {
        self.core.set_image_size(image)
    }

    pub fn on_viewport_resize(&mut self, viewport: Size) -> Vec<Action> {
        self.core.on_viewport_resize(viewport)
    }

    // --- Delegated input ---

    pub fn handle(&mut self, event: InputEvent) -> Vec<Action> {
        self.core.handle(event)
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.core.zoom_in()
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.core.zoom_out()
    }

    pub fn reset(&mut self) -> Vec<Action> {
        self.core.reset()
    }

    // --- Render ---

    /// Write the committed transform to the image element's style.
    ///
    /// The image stays hidden until geometry is known so it never flashes at
    /// its natural size.
    ///
    /// # Errors
    ///
    /// Returns the browser's error if a style property cannot be set.
    pub fn render(&self) -> Result<(), JsValue> {
        let style = self.element.style();
        match self.core.current_transform() {
            Some(t) => {
                style.set_property("transform", &transform_css(t))?;
                style.set_property("visibility", "visible")
            }
            None => style.set_property("visibility", "hidden"),
        }
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn current_transform(&self) -> Option<Transform> {
        self.core.current_transform()
    }

    #[must_use]
    pub fn zoom_percent_of_initial(&self) -> Option<u32> {
        self.core.zoom_percent_of_initial()
    }
}
