use std::io::{self, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute, terminal,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

use flappy_mini::audio::Audio;
use flappy_mini::fireworks::Fireworks;
use flappy_mini::game::{CANVAS_H, CANVAS_W, Game};
use flappy_mini::input::{self, Command};
use flappy_mini::render::{self, PixelBuf};

fn main() -> io::Result<()> {
    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
        EnableMouseCapture,
    )?;

    let cleanup = |out: &mut io::Stdout| -> io::Result<()> {
        execute!(
            out,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        terminal::disable_raw_mode()
    };

    let (cols, rows) = terminal::size()?;
    let mut buf = PixelBuf::new(cols as usize, rows as usize * 2);
    let mut game = Game::new(CANVAS_W, CANVAS_H);
    let mut fireworks = Fireworks::new();
    let mut rng = StdRng::from_entropy();
    let audio = Audio::open();

    // The physics constants assume roughly 60 ticks per second.
    let frame_dur = Duration::from_millis(16);

    loop {
        let frame_start = Instant::now();

        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            if let Event::Resize(c, r) = ev {
                buf.resize(c as usize, r as usize * 2);
                continue;
            }
            match input::map_event(&ev) {
                Some(Command::Quit) => {
                    cleanup(&mut out)?;
                    return Ok(());
                }
                Some(Command::Primary) => game.primary_input(),
                Some(Command::Restart) => game.restart(),
                None => {}
            }
        }

        let events = game.update(&mut rng);
        if events.game_over {
            if let Some(audio) = &audio {
                audio.play_death();
            }
        }
        if events.celebration {
            fireworks.launch(buf.w as f64, buf.h as f64, &mut rng);
            if let Some(audio) = &audio {
                audio.play_celebration();
            }
        }
        fireworks.update();

        render::draw_frame(&game, &mut buf);
        fireworks.draw(&mut buf);
        buf.render(&mut out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }
}
