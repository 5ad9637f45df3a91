use wheelcore::command::Command;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Remote(Command),
    ConfigReload,
}
