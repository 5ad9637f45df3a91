use crate::gui::app::{AppModel, AppMsg};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::ComponentSender;
use wheelcore::prizes::Label;
use wheelcore::trivia::TriviaChallenge;

/// Modal announcing the winner, with the optional trivia gate in front of "Take out".
pub struct WinnerDialog {
    window: gtk::Window,
    prize: gtk::Label,
    question: gtk::Label,
    answer: gtk::Entry,
    submit: gtk::Button,
    feedback: gtk::Label,
    take_out: gtk::Button,
}

impl WinnerDialog {
    pub fn new(parent: &gtk::ApplicationWindow, sender: &ComponentSender<AppModel>) -> Self {
        let window = gtk::Window::builder()
            .title("Congratulations!")
            .modal(true)
            .transient_for(parent)
            .resizable(false)
            .hide_on_close(true)
            .build();

        let content = gtk::Box::new(gtk::Orientation::Vertical, 12);
        content.set_margin_top(24);
        content.set_margin_bottom(24);
        content.set_margin_start(24);
        content.set_margin_end(24);

        let heading = gtk::Label::new(Some("You won:"));
        let prize = gtk::Label::new(None);
        prize.add_css_class("winner-prize");

        let question = gtk::Label::new(None);
        question.set_wrap(true);
        let answer = gtk::Entry::new();
        answer.set_placeholder_text(Some("Your answer"));
        let submit = gtk::Button::with_label("Answer");
        let feedback = gtk::Label::new(None);
        feedback.add_css_class("prize-notice");

        let buttons = gtk::Box::new(gtk::Orientation::Horizontal, 12);
        buttons.set_homogeneous(true);
        let close = gtk::Button::with_label("Close");
        let take_out = gtk::Button::with_label("Take out");
        take_out.add_css_class("suggested-action");
        buttons.append(&close);
        buttons.append(&take_out);

        for widget in [
            heading.upcast_ref::<gtk::Widget>(),
            prize.upcast_ref(),
            question.upcast_ref(),
            answer.upcast_ref(),
            submit.upcast_ref(),
            feedback.upcast_ref(),
            buttons.upcast_ref(),
        ] {
            content.append(widget);
        }
        window.set_child(Some(&content));

        {
            let sender = sender.clone();
            let entry = answer.clone();
            submit.connect_clicked(move |_| sender.input(AppMsg::Answer(entry.text().to_string())));
        }
        {
            let sender = sender.clone();
            answer.connect_activate(move |entry| {
                sender.input(AppMsg::Answer(entry.text().to_string()));
            });
        }
        {
            let sender = sender.clone();
            close.connect_clicked(move |_| sender.input(AppMsg::Dismiss));
        }
        {
            let sender = sender.clone();
            take_out.connect_clicked(move |_| sender.input(AppMsg::Claim));
        }
        {
            let sender = sender.clone();
            window.connect_close_request(move |_| {
                sender.input(AppMsg::Dismiss);
                glib::Propagation::Proceed
            });
        }

        Self {
            window,
            prize,
            question,
            answer,
            submit,
            feedback,
            take_out,
        }
    }

    pub fn present(&self, label: &Label, challenge: Option<&TriviaChallenge>) {
        self.prize.set_label(label);
        self.feedback.set_label("");
        self.feedback.set_visible(false);
        self.answer.set_text("");

        let gated = challenge.is_some_and(|c| !c.is_unlocked());
        self.question
            .set_label(challenge.map(|c| c.question().question.as_str()).unwrap_or(""));
        self.question.set_visible(challenge.is_some());
        self.answer.set_visible(gated);
        self.submit.set_visible(gated);
        self.take_out.set_sensitive(!gated);

        self.window.present();
    }

    pub fn unlock(&self) {
        self.answer.set_visible(false);
        self.submit.set_visible(false);
        self.take_out.set_sensitive(true);
        self.show_feedback("Correct! You can take the prize out now.");
    }

    pub fn show_feedback(&self, text: &str) {
        self.feedback.set_label(text);
        self.feedback.set_visible(true);
    }

    pub fn hide(&self) {
        self.window.set_visible(false);
    }
}
