use macroquad::prelude::*;

fn window_conf() -> Conf {
    let size = josephus_web_lib::startup_settings().settings.window_size as i32;
    Conf {
        window_title: "Josephus".to_owned(),
        window_width: size,
        window_height: size,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    josephus_web_lib::run().await;
}
