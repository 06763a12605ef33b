mod aggregate;
mod animation;
mod app;
mod error;
mod icons;
mod logging;
mod model;
mod pages;
mod repository;
mod settings;
mod storage;
mod tracker;
mod view_model;

fn main() {
    logging::init();
    yew::Renderer::<app::App>::new().render();
}
