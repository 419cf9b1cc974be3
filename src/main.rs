//! Fortune Ring terminal client
//!
//! Drives the engine from the command line for development: roll the dice,
//! watch the ring, reset. The browser presentation layer consumes the same
//! session surface through the wasm bindings instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::io::{self, BufRead, Write};

    use fortune_ring::sim::{Cell, GameEvent};
    use fortune_ring::{GameSession, Mode, Settings};

    fn parse_args() -> (Mode, Option<u64>) {
        let mut mode = Settings::load().mode;
        let mut seed = None;
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--remote" => {
                    let base_url = args
                        .next()
                        .unwrap_or_else(|| Settings::DEFAULT_BACKEND_URL.to_string());
                    mode = Mode::Remote { base_url };
                }
                "--seed" => {
                    seed = args.next().and_then(|s| s.parse().ok());
                }
                other => {
                    eprintln!("unknown argument: {other}");
                    eprintln!("usage: fortune-ring [--remote [URL]] [--seed N]");
                    std::process::exit(2);
                }
            }
        }
        (mode, seed)
    }

    fn render(session: &GameSession) {
        let cells: Vec<String> = session
            .board()
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let text = match cell {
                    Cell::Prize(v) => v.to_string(),
                    Cell::Bonus => "bonus".to_string(),
                };
                if i == session.current_index() {
                    format!("[{text}]")
                } else {
                    text
                }
            })
            .collect();
        println!("ring: {}", cells.join(" "));
        print!("balance: {}", session.balance());
        if session.bonus_mode() {
            print!("  BONUS ROUND ({} free spins left)", session.freespins());
        }
        if !session.available_to_spin() {
            print!("  (cannot afford a roll)");
        }
        println!();
    }

    fn report(events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::DiceRolled { d1, d2 } => {
                    println!("dice: {d1} + {d2} = {}", d1 + d2)
                }
                GameEvent::PrizeWon { amount } => println!("won {amount} credits"),
                GameEvent::BonusEntered => println!("*** bonus round: prizes x10 ***"),
                GameEvent::BonusExited => println!("bonus round over, fresh ring"),
                GameEvent::RollRefused => println!("not enough credits to roll"),
                GameEvent::GameReset => println!("game reset"),
            }
        }
    }

    pub fn run() {
        env_logger::init();

        let (mode, seed) = parse_args();
        let seed = seed.unwrap_or_else(rand::random);
        let mut session = GameSession::new(mode, seed);

        println!(
            "fortune-ring ({} mode, seed {seed})",
            if session.is_local() { "local" } else { "remote" }
        );
        render(&session);

        let stdin = io::stdin();
        loop {
            print!("[r]oll  [x] reset  [q]uit > ");
            let _ = io::stdout().flush();
            let Some(Ok(line)) = stdin.lock().lines().next() else {
                break;
            };
            match line.trim() {
                "r" | "roll" | "" => session.roll(),
                "x" | "reset" => session.reset(),
                "q" | "quit" => break,
                other => {
                    println!("unknown command: {other}");
                    continue;
                }
            }
            report(&session.take_events());
            render(&session);

            if session.out_of_credits() {
                // Terminal condition lives out here, not in the engine:
                // blocking notice, then a full reset.
                println!("out of credits - game over. press enter for a new game");
                let _ = stdin.lock().lines().next();
                session.reset();
                report(&session.take_events());
                render(&session);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds enter through the wasm bindings in the library
}
