use canvas::Screen;
use gridcast::game::Game;
use gridcast::player::InputSnapshot;
use gridcast::{HEIGHT, WIDTH};
use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use std::ops::ControlFlow;
use std::time::{Duration, Instant};

mod canvas;

// helper trait to convert strings into std::error types
trait StringToAnyhow<T> {
    fn ah(self) -> anyhow::Result<T>;
}

impl<T> StringToAnyhow<T> for Result<T, String> {
    fn ah(self) -> anyhow::Result<T> {
        self.map_err(|err| anyhow::anyhow!("{err}"))
    }
}

const TARGET_FPS: u64 = 60;

const TITLE: &str = "gridcast - WASD to move, mouse to look, M for map, Esc to exit";

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_custom_env("GRIDCAST_LOG");
    // sdl boilerplate
    log::info!("initializing sdl2");
    let sdl_ctx = sdl2::init().ah()?;
    log::info!("initializing video");
    let video = sdl_ctx.video().ah()?;

    log::info!("initializing window");
    let mut window = video
        .window(TITLE, WIDTH as u32, HEIGHT as u32)
        .position_centered()
        .build()?;
    window.set_resizable(false);

    log::info!("creating canvas");
    let canvas = window.into_canvas().build()?;

    log::info!("capturing mouse");
    let mouse = sdl_ctx.mouse();
    mouse.show_cursor(false);
    mouse.set_relative_mouse_mode(true);

    log::info!("pumping events");
    let mut events = sdl_ctx.event_pump().ah()?;

    log::info!("initializing game state");
    let mut game = Game::default();
    log::debug!("map is {}x{} tiles", game.map().width, game.map().height);
    let mut screen = Screen { canvas };

    let delta = Duration::from_millis(1_000 / TARGET_FPS);
    // the pointer is captured, so motion is summed into a virtual cursor
    let mut cursor_x = 0;

    'main_loop: loop {
        let prev = Instant::now();

        let mut toggle_minimap = false;
        let mut exit = false;

        // handle events
        for ev in events.poll_iter() {
            match ev {
                Event::Quit { .. } => break 'main_loop,
                Event::KeyDown {
                    keycode: Some(k),
                    repeat: false,
                    ..
                } => match k {
                    Keycode::Escape => exit = true,
                    Keycode::M => toggle_minimap = true,
                    _ => {}
                },
                Event::MouseMotion { xrel, .. } => cursor_x += xrel,
                _ => {}
            }
        }

        let keys = events.keyboard_state();
        let input = InputSnapshot {
            forward: keys.is_scancode_pressed(Scancode::W),
            back: keys.is_scancode_pressed(Scancode::S),
            strafe_left: keys.is_scancode_pressed(Scancode::A),
            strafe_right: keys.is_scancode_pressed(Scancode::D),
            exit,
            toggle_minimap,
            cursor_x,
        };

        if let ControlFlow::Break(()) = game.update(&input) {
            log::info!("shutting down");
            break 'main_loop;
        }

        // draw game
        if let Err(err) = game.draw(&mut screen) {
            log::error!("error while drawing frame: {err}");
            return Err(err);
        }
        screen.canvas.present();

        let diff = prev.elapsed();
        if diff < delta {
            std::thread::sleep(delta - diff);
        }
    }

    Ok(())
}
