use crate::config::SelectorConfig;
use crate::error::SelectorError;
use crate::geometry::{Geometry, Point};
use crate::render::{self, Surface};
use crate::swatch::{Palette, Swatch};

pub type ColorListener = Box<dyn FnMut(Swatch)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Down,
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub point: Point,
    pub phase: TouchPhase,
}

impl TouchEvent {
    pub fn new(point: Point, phase: TouchPhase) -> Self {
        Self { point, phase }
    }
}

/// What the host should do after a touch event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchResponse {
    pub should_redraw: bool,
    pub selection_changed: bool,
}

impl TouchResponse {
    pub fn new(should_redraw: bool, selection_changed: bool) -> Self {
        Self {
            should_redraw,
            selection_changed,
        }
    }
}

/// Circular picker over a fixed palette.
///
/// The host reports its bounds through [`on_bounds_changed`](Self::on_bounds_changed),
/// forwards pointer input to the `handle_touch_*` methods, and calls
/// [`render`](Self::render) whenever a response asks for a redraw.
pub struct ColorWheelSelector {
    config: SelectorConfig,
    palette: Palette,
    geometry: Geometry,
    bounds: (f64, f64),
    scale_factor: f64,
    selected: usize,
    touch_angle: f64,
    drag: DragState,
    listener: Option<ColorListener>,
}

impl ColorWheelSelector {
    pub fn new(config: SelectorConfig) -> Result<Self, SelectorError> {
        let palette = Palette::new(config.palette.clone())?;
        let scale_factor = 1.0;
        Ok(Self {
            geometry: Geometry::calculate(0.0, 0.0, &config, scale_factor),
            config,
            palette,
            bounds: (0.0, 0.0),
            scale_factor,
            selected: 0,
            touch_angle: 0.0,
            drag: DragState::Idle,
            listener: None,
        })
    }

    pub fn set_listener(&mut self, listener: impl FnMut(Swatch) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    /// Swaps in a new configuration, keeping bounds, scale, angle and listener.
    /// The selection follows the current angle on the new palette; the
    /// listener is not notified.
    pub fn reconfigure(&mut self, config: SelectorConfig) -> Result<(), SelectorError> {
        self.palette = Palette::new(config.palette.clone())?;
        self.config = config;
        self.selected = self.palette.index_at(self.touch_angle);
        self.recalculate_geometry();
        Ok(())
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
        self.recalculate_geometry();
    }

    pub fn on_bounds_changed(&mut self, width: f64, height: f64) {
        self.bounds = (width, height);
        self.recalculate_geometry();
        log::debug!(
            "Ring bounds {}x{}: outer {:.1}, inner {:.1}",
            width,
            height,
            self.geometry.outer_radius,
            self.geometry.inner_radius
        );
    }

    fn recalculate_geometry(&mut self) {
        let (width, height) = self.bounds;
        self.geometry = Geometry::calculate(width, height, &self.config, self.scale_factor);
    }

    pub fn angle_of(&self, point: Point) -> f64 {
        self.geometry.angle_of(point)
    }

    pub fn color_at(&self, angle: f64) -> Swatch {
        self.palette.color_at(angle)
    }

    pub fn handle_touch(&mut self, event: TouchEvent) -> TouchResponse {
        match event.phase {
            TouchPhase::Down => self.handle_touch_down(event.point),
            TouchPhase::Move => self.handle_touch_move(event.point),
            TouchPhase::Up => self.handle_touch_up(),
        }
    }

    pub fn handle_touch_down(&mut self, point: Point) -> TouchResponse {
        if !self.geometry.accepts(point) {
            log::debug!("Ignoring press at ({:.1}, {:.1})", point.x, point.y);
            return TouchResponse::default();
        }
        self.drag = DragState::Dragging;
        self.update_selection(point)
    }

    pub fn handle_touch_move(&mut self, point: Point) -> TouchResponse {
        if self.drag != DragState::Dragging {
            return TouchResponse::default();
        }
        self.update_selection(point)
    }

    pub fn handle_touch_up(&mut self) -> TouchResponse {
        let was_dragging = self.drag == DragState::Dragging;
        self.drag = DragState::Idle;
        TouchResponse::new(was_dragging, false)
    }

    fn update_selection(&mut self, point: Point) -> TouchResponse {
        let previous = self.selected;
        self.touch_angle = self.angle_of(point);
        self.selected = self.palette.index_at(self.touch_angle);

        let color = self.selected();
        if let Some(listener) = self.listener.as_mut() {
            listener(color);
        }

        TouchResponse::new(true, previous != self.selected)
    }

    /// True when a confirm button is configured and `point` lies on it.
    pub fn button_contains(&self, point: Point) -> bool {
        self.config.button.as_ref().is_some_and(|button| {
            self.geometry.center.distance_to(point) <= button.radius * self.scale_factor
        })
    }

    pub fn thumb_position(&self) -> Point {
        self.geometry.point_at(self.touch_angle, self.geometry.mid_radius())
    }

    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        render::draw(surface, self)
    }

    pub fn selected(&self) -> Swatch {
        self.color_at(self.touch_angle)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn touch_angle(&self) -> f64 {
        self.touch_angle
    }

    pub fn is_dragging(&self) -> bool {
        self.drag == DragState::Dragging
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}
