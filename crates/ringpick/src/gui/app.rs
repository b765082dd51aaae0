use crate::config;
use crate::events::AppEvent;
use crate::gui::theme;
use colorring::{
    CairoSurface, ColorWheelSelector, ImageCache, Point, Preset, Swatch, TouchEvent, TouchPhase,
};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Command-line choices that outlive the first config load.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config_path: PathBuf,
    pub preset: Option<Preset>,
    pub scale_factor: Option<f64>,
}

pub struct AppModel {
    pub selector: Rc<RefCell<ColorWheelSelector>>,
    pub images: Rc<RefCell<ImageCache>>,
    pub settings: Settings,
    pub title: String,
    /// A press that started on the confirm button.
    pub button_pressed: bool,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Touch(TouchEvent),
    Selected(Swatch),
    Confirm,
    Cancel,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

fn title_for(color: Swatch) -> String {
    format!("ringpick {}", color)
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        ColorWheelSelector,
        Settings,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            #[watch]
            set_title: Some(&model.title),
            set_default_width: 420,
            set_default_height: 420,
            add_css_class: "ringpick-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match key {
                        gtk::gdk::Key::Escape => {
                            sender.input(AppMsg::Cancel);
                            glib::Propagation::Stop
                        }
                        gtk::gdk::Key::Return | gtk::gdk::Key::KP_Enter => {
                            sender.input(AppMsg::Confirm);
                            glib::Propagation::Stop
                        }
                        _ => glib::Propagation::Proceed,
                    }
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "ringpick-drawing-area",

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, y| {
                        let point = Point::new(x, y);
                        sender.input(AppMsg::Touch(TouchEvent::new(point, TouchPhase::Down)));
                    },
                    connect_drag_update[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            let point = Point::new(x + dx, y + dy);
                            sender.input(AppMsg::Touch(TouchEvent::new(point, TouchPhase::Move)));
                        }
                    },
                    connect_drag_end[sender] => move |gesture, dx, dy| {
                        let (x, y) = gesture.start_point().unwrap_or_default();
                        let point = Point::new(x + dx, y + dy);
                        sender.input(AppMsg::Touch(TouchEvent::new(point, TouchPhase::Up)));
                    },
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (mut selector, settings, rx) = init;

        theme::load_css();

        {
            let sender = sender.clone();
            selector.set_listener(move |color| sender.input(AppMsg::Selected(color)));
        }

        let model = AppModel {
            title: title_for(selector.selected()),
            selector: Rc::new(RefCell::new(selector)),
            images: Rc::new(RefCell::new(ImageCache::new())),
            settings,
            button_pressed: false,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let selector_draw = model.selector.clone();
        let images = model.images.clone();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, _, _| {
                let selector = selector_draw.borrow();
                let mut images = images.borrow_mut();
                if let Err(e) = selector.render(&mut CairoSurface::new(cr, &mut images)) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let selector_resize = model.selector.clone();
        widgets
            .drawing_area
            .connect_resize(move |_, width, height| {
                selector_resize
                    .borrow_mut()
                    .on_bounds_changed(width as f64, height as f64);
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Touch(event) => self.handle_touch(event, &sender),
            AppMsg::Selected(color) => {
                log::debug!("Selected {}", color);
                self.title = title_for(color);
            }
            AppMsg::Confirm => {
                let color = self.selector.borrow().selected();
                log::info!("Confirmed {}", color);
                println!("{}", color);
                relm4::main_application().quit();
            }
            AppMsg::Cancel => {
                log::info!("Cancelled without a selection");
                relm4::main_application().quit();
            }
            AppMsg::ConfigReload => self.reload_config(),
        }
    }
}

impl AppModel {
    /// Presses on the confirm button never reach the ring; releasing on the
    /// button confirms.
    fn handle_touch(&mut self, event: TouchEvent, sender: &ComponentSender<Self>) {
        let on_button = self.selector.borrow().button_contains(event.point);

        let response = match event.phase {
            TouchPhase::Down if on_button => {
                self.button_pressed = true;
                return;
            }
            TouchPhase::Up if self.button_pressed => {
                self.button_pressed = false;
                if on_button {
                    sender.input(AppMsg::Confirm);
                }
                return;
            }
            _ => self.selector.borrow_mut().handle_touch(event),
        };

        if response.should_redraw {
            self.drawing_area.queue_draw();
        }
    }

    fn reload_config(&mut self) {
        let new_config = match config::load_config(&self.settings.config_path, self.settings.preset)
        {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to reload config: {}", e);
                return;
            }
        };

        let mut selector = self.selector.borrow_mut();
        if let Err(e) = selector.reconfigure(new_config.ring) {
            log::error!("Rejected reloaded config: {}", e);
            return;
        }
        selector.set_scale_factor(self.settings.scale_factor.unwrap_or(new_config.scale_factor));
        self.title = title_for(selector.selected());
        self.images.borrow_mut().clear();
        self.drawing_area.queue_draw();
        log::info!("Configuration reloaded");
    }
}
