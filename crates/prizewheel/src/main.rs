use prizewheel::config;
use prizewheel::gui::app::AppModel;
use prizewheel::sys::runtime;
use relm4::prelude::*;
use wheelcore::prizes::PrizeList;
use wheelcore::session::SpinSession;
use wheelcore::store::{self, JsonFileStore, MemoryStore, PrizeStore};

fn open_store(config: &config::Config) -> Box<dyn PrizeStore> {
    match JsonFileStore::in_data_dir(&config.prizes.storage_key) {
        Ok(store) => {
            log::debug!("Saving prizes to {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            log::warn!("Prizes will not survive a restart: {}", e);
            Box::new(MemoryStore::default())
        }
    }
}

fn main() {
    env_logger::init();

    let config = config::load_or_setup();
    let store = open_store(&config);

    let defaults = config.prizes.defaults.clone();
    let labels = store::load_or_defaults(store.as_ref(), &defaults);
    let prizes = PrizeList::new(labels, defaults, config.prizes.duplicates);
    let session = SpinSession::new(prizes, config.spin)
        .with_trivia(config.trivia.clone())
        .with_list_lock(config.prizes.lock_while_spinning);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.prizewheel.PrizeWheel");

    app.run::<AppModel>((session, store, config, rx));
}
