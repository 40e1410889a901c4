fn main() {
    #[cfg(target_arch = "wasm32")]
    campusboard_frontend::run();

    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("campusboard-frontend runs in the browser; build it for wasm32-unknown-unknown");
}
