use chess_core::worker::GameWorker;
use gloo_worker::Registrable;

fn main() {
    console_error_panic_hook::set_once();
    // A logger may already be installed.
    console_log::init_with_level(log::Level::Debug).ok();
    GameWorker::registrar().register();
}
