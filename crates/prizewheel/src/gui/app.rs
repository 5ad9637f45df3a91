use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::dialog::WinnerDialog;
use crate::gui::status::Status;
use crate::gui::theme::{self, WheelColors};
use crate::gui::wheel::{self, WheelLayout, WheelState};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;
use wheelcore::command::Command;
use wheelcore::prizes::PrizeError;
use wheelcore::session::{
    Claim, Rejection, SessionError, SpinId, SpinOutcome, SpinRequest, SpinSession,
};
use wheelcore::store::{self, PrizeStore};

pub struct AppModel {
    pub session: SpinSession,
    pub store: Box<dyn PrizeStore>,
    pub config: Config,
    pub status: Status,
    pub notice: Option<String>,
    pub wheel: Rc<RefCell<WheelState>>,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
    pub prize_list: gtk::ListBox,
    pub entry: gtk::Entry,
    dialog: Option<WinnerDialog>,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Spin,
    SpinFinished(SpinId),
    Dismiss,
    Claim,
    Answer(String),
    AddFromEntry,
    Add(String),
    Remove(usize),
    Clear,
    Defaults,
    ClearStorage,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Remote(command) => match command {
                Command::Show => AppMsg::Show,
                Command::Spin => AppMsg::Spin,
                Command::Dismiss => AppMsg::Dismiss,
                Command::Claim => AppMsg::Claim,
                Command::Answer(text) => AppMsg::Answer(text),
                Command::Add(label) => AppMsg::Add(label.into()),
                Command::Remove(index) => AppMsg::Remove(index),
                Command::Clear => AppMsg::Clear,
                Command::Defaults => AppMsg::Defaults,
                Command::ClearStorage => AppMsg::ClearStorage,
            },
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn spin_label(&self) -> &'static str {
        if self.session.is_spinning() {
            "SPINNING..."
        } else {
            "SPIN!"
        }
    }

    fn list_locked(&self) -> bool {
        self.config.prizes.lock_while_spinning && self.session.is_spinning()
    }

    fn persist(&self) {
        store::save_best_effort(self.store.as_ref(), self.session.prizes().current());
    }

    /// Pushes the session's view of the wheel to the drawing area.
    fn sync_wheel(&self) {
        let segments = self.session.displayed_segments();
        let highlight = self
            .session
            .winner()
            .filter(|w| segments.get(w.index) == Some(&w.label))
            .map(|w| w.index);

        self.wheel
            .borrow_mut()
            .sync(segments, self.session.rotation(), highlight);
        self.drawing_area.queue_draw();
    }

    fn refresh_prize_list(&self, sender: &ComponentSender<Self>) {
        while let Some(child) = self.prize_list.first_child() {
            self.prize_list.remove(&child);
        }

        let locked = self.list_locked();
        for (index, label) in self.session.prizes().current().iter().enumerate() {
            let row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
            let name = gtk::Label::new(Some(label.as_str()));
            name.set_hexpand(true);
            name.set_xalign(0.0);

            let delete = gtk::Button::with_label("Delete");
            delete.set_sensitive(!locked);
            let sender = sender.clone();
            delete.connect_clicked(move |_| sender.input(AppMsg::Remove(index)));

            row.append(&name);
            row.append(&delete);
            self.prize_list.append(&row);
        }
    }

    /// Redraws every frame until the spin animation runs out.
    fn animate(&self) {
        let wheel = self.wheel.clone();
        self.drawing_area.add_tick_callback(move |area, _| {
            area.queue_draw();
            if wheel.borrow().is_animating(Instant::now()) {
                glib::ControlFlow::Continue
            } else {
                glib::ControlFlow::Break
            }
        });
    }

    fn list_changed(&mut self, status: Status, sender: &ComponentSender<Self>) {
        self.notice = None;
        self.status = status;
        self.persist();
        self.refresh_prize_list(sender);
        self.sync_wheel();
    }

    fn report(&mut self, error: SessionError) {
        match error {
            // blank input is ignored, like pressing Enter on an empty field
            SessionError::Prize(PrizeError::EmptyLabel) => {}
            e => self.notice = Some(e.to_string()),
        }
    }

    fn hide_dialog(&self) {
        if let Some(dialog) = &self.dialog {
            dialog.hide();
        }
    }

    fn spin(&mut self, sender: &ComponentSender<Self>) {
        match self.session.request_spin(&mut rand::rng()) {
            SpinRequest::Started(ticket) => {
                self.hide_dialog();
                self.notice = None;
                self.status = Status::Spinning;
                self.wheel
                    .borrow_mut()
                    .start_spin(&ticket, Instant::now());
                self.animate();
                self.refresh_prize_list(sender);

                let sender = sender.clone();
                glib::timeout_add_local_once(ticket.duration, move || {
                    sender.input(AppMsg::SpinFinished(ticket.id));
                });
            }
            SpinRequest::Ignored(Rejection::NoSegments) => self.status = Status::Empty,
            SpinRequest::Ignored(reason) => log::debug!("Spin ignored: {}", reason),
        }
    }

    fn finish_spin(&mut self, id: SpinId, sender: &ComponentSender<Self>) {
        let Some(outcome) = self.session.animation_complete(id).cloned() else {
            return;
        };
        self.wheel.borrow_mut().finish_spin();

        match outcome {
            SpinOutcome::Winner(winner) => {
                self.status = Status::Winner(winner.label.clone());
                if let Some(dialog) = &self.dialog {
                    dialog.present(&winner.label, self.session.challenge());
                }
            }
            SpinOutcome::NoWinner => self.status = Status::NoWinner,
        }

        self.refresh_prize_list(sender);
        self.sync_wheel();
    }

    fn claim(&mut self, sender: &ComponentSender<Self>) {
        match self.session.take_out() {
            Ok(Claim::Removed { label, .. }) => {
                self.hide_dialog();
                self.list_changed(Status::TakenOut(label), sender);
            }
            Ok(Claim::Missing(label)) => {
                self.hide_dialog();
                self.status = Status::AlreadyGone(label);
                self.sync_wheel();
            }
            Err(SessionError::TriviaPending) => {
                if let Some(dialog) = &self.dialog {
                    dialog.show_feedback("Answer the question first.");
                }
            }
            Err(e) => log::warn!("Cannot take out prize: {}", e),
        }
    }

    fn answer(&mut self, text: &str) {
        match self.session.answer_trivia(text) {
            Ok(true) => {
                if let Some(dialog) = &self.dialog {
                    dialog.unlock();
                }
            }
            Ok(false) => {
                if let Some(dialog) = &self.dialog {
                    dialog.show_feedback("Not quite. Try again!");
                }
            }
            Err(e) => log::warn!("Ignoring trivia answer: {}", e),
        }
    }

    fn reload_config(&mut self) {
        match config::load_config() {
            Ok(new_config) => {
                self.session.reconfigure(
                    new_config.spin,
                    new_config.trivia.clone(),
                    new_config.prizes.lock_while_spinning,
                );
                self.session.set_list_policy(
                    new_config.prizes.defaults.clone(),
                    new_config.prizes.duplicates,
                );
                if new_config.prizes.storage_key != self.config.prizes.storage_key {
                    log::info!("Storage key change takes effect on restart");
                }
                self.config = new_config;
                log::info!("Configuration reloaded");
            }
            Err(e) => log::error!("Failed to reload config: {}", e),
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        SpinSession,
        Box<dyn PrizeStore>,
        Config,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("Prize Wheel"),
            set_default_width: 920,
            set_default_height: 620,

            gtk::Box {
                set_orientation: gtk::Orientation::Horizontal,
                set_spacing: 24,
                set_margin_all: 24,

                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 12,
                    set_hexpand: true,

                    #[name = "drawing_area"]
                    gtk::DrawingArea {
                        set_content_width: 460,
                        set_content_height: 460,
                        set_hexpand: true,
                        set_vexpand: true,
                    },

                    gtk::Button {
                        #[watch]
                        set_label: model.spin_label(),
                        #[watch]
                        set_sensitive: model.session.can_spin(),
                        set_halign: gtk::Align::Center,
                        add_css_class: "spin-button",
                        connect_clicked => AppMsg::Spin,
                    },

                    gtk::Label {
                        #[watch]
                        set_label: &model.status.to_string(),
                        set_wrap: true,
                        add_css_class: "status-line",
                    },
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 8,
                    set_width_request: 320,

                    gtk::Label {
                        set_label: "Prizes",
                        set_xalign: 0.0,
                        add_css_class: "title-3",
                    },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Horizontal,
                        set_spacing: 6,
                        #[watch]
                        set_sensitive: !model.list_locked(),

                        #[name = "entry"]
                        gtk::Entry {
                            set_placeholder_text: Some("Prize name"),
                            set_hexpand: true,
                            connect_activate => AppMsg::AddFromEntry,
                        },

                        gtk::Button {
                            set_label: "Add",
                            connect_clicked => AppMsg::AddFromEntry,
                        },
                    },

                    gtk::Label {
                        #[watch]
                        set_label: model.notice.as_deref().unwrap_or(""),
                        #[watch]
                        set_visible: model.notice.is_some(),
                        set_xalign: 0.0,
                        add_css_class: "prize-notice",
                    },

                    gtk::ScrolledWindow {
                        set_vexpand: true,

                        #[name = "prize_list"]
                        gtk::ListBox {
                            set_selection_mode: gtk::SelectionMode::None,
                        },
                    },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Horizontal,
                        set_spacing: 6,
                        set_homogeneous: true,
                        #[watch]
                        set_sensitive: !model.list_locked(),

                        gtk::Button {
                            set_label: "Clear all",
                            connect_clicked => AppMsg::Clear,
                        },
                        gtk::Button {
                            set_label: "Load defaults",
                            connect_clicked => AppMsg::Defaults,
                        },
                        gtk::Button {
                            set_label: "Clear saved",
                            connect_clicked => AppMsg::ClearStorage,
                        },
                    },
                },
            },
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (session, store, config, rx) = init;

        theme::load_css();

        let wheel_state = Rc::new(RefCell::new(WheelState::new(
            session.displayed_segments().to_vec(),
        )));

        let model = AppModel {
            status: Status::idle(!session.prizes().is_empty()),
            session,
            store,
            config,
            notice: None,
            wheel: wheel_state,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
            prize_list: gtk::ListBox::default(),
            entry: gtk::Entry::default(),
            dialog: None,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        model.prize_list = widgets.prize_list.clone();
        model.entry = widgets.entry.clone();
        model.dialog = Some(WinnerDialog::new(&root, &sender));

        let placeholder = gtk::Label::new(Some("No prizes yet. Add one to start the draw."));
        placeholder.set_margin_all(20);
        model.prize_list.set_placeholder(Some(&placeholder));

        let wheel_draw = model.wheel.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = WheelColors::from_context(&style_context);
                let layout = WheelLayout::fit(f64::from(width), f64::from(height));
                if let Err(e) = wheel::draw(cr, &wheel_draw.borrow(), &layout, &colors, Instant::now())
                {
                    log::error!("Drawing error: {}", e);
                }
            });

        model.refresh_prize_list(&sender);
        model.sync_wheel();

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
            AppMsg::Show => self.root.present(),
            AppMsg::Spin => self.spin(&sender),
            AppMsg::SpinFinished(id) => self.finish_spin(id, &sender),
            AppMsg::Dismiss => {
                self.hide_dialog();
                if self.session.dismiss_result() {
                    self.status = Status::idle(!self.session.prizes().is_empty());
                    self.sync_wheel();
                }
            }
            AppMsg::Claim => self.claim(&sender),
            AppMsg::Answer(text) => self.answer(&text),
            AppMsg::AddFromEntry => {
                let text = self.entry.text().to_string();
                sender.input(AppMsg::Add(text));
            }
            AppMsg::Add(text) => match self.session.add_label(&text) {
                Ok(label) => {
                    log::info!("Added prize \"{}\"", label);
                    self.entry.set_text("");
                    let status = Status::idle(true);
                    self.list_changed(status, &sender);
                }
                Err(e) => self.report(e),
            },
            AppMsg::Remove(index) => match self.session.remove_at(index) {
                Ok(label) => {
                    log::info!("Removed prize \"{}\"", label);
                    let status = Status::idle(!self.session.prizes().is_empty());
                    self.list_changed(status, &sender);
                }
                Err(e) => self.report(e),
            },
            AppMsg::Clear => match self.session.clear_all() {
                Ok(()) => self.list_changed(Status::Cleared, &sender),
                Err(e) => self.report(e),
            },
            AppMsg::Defaults => match self.session.reset_to_defaults() {
                Ok(()) => self.list_changed(Status::DefaultsLoaded, &sender),
                Err(e) => self.report(e),
            },
            AppMsg::ClearStorage => match self.session.reset_to_defaults() {
                Ok(()) => {
                    store::clear_best_effort(self.store.as_ref());
                    self.list_changed(Status::StorageCleared, &sender);
                }
                Err(e) => self.report(e),
            },
            AppMsg::ConfigReload => self.reload_config(),
        }
    }
}
