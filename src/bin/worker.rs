use dama_core::worker::AiWorker;
use gloo_worker::Registrable;

fn main() {
    console_error_panic_hook::set_once();
    AiWorker::registrar().register();
}
