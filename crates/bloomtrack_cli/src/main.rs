//! Line-oriented tracker driver.
//!
//! # Responsibility
//! - Exercise `bloomtrack_core` sessions without the Flutter runtime.
//! - Read one command per stdin line and print the resulting state.
//!
//! Usage: `bloomtrack_cli [config.json]`, then commands
//! `add <name>`, `toggle <n>`, `remove <n>`, `submit`, `poll`, `show`,
//! `quit`. Task numbers are 1-based positions from `show`.

use bloomtrack_core::{
    Intent, LevelUpEvent, TaskId, TrackerConfig, TrackerSession, TrackerSnapshot,
};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match load_config(std::env::args().nth(1)) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    println!("bloomtrack_core ping={}", bloomtrack_core::ping());
    println!("bloomtrack_core version={}", bloomtrack_core::core_version());

    let mut session = TrackerSession::new(config).with_notifier(|event: &LevelUpEvent| {
        println!("level up! {} -> {}", event.previous_level, event.new_level);
    });
    print_snapshot(&session.snapshot());

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                eprintln!("failed to read stdin: {err}");
                return ExitCode::FAILURE;
            }
        };
        let (command, argument) = split_command(&line);
        match command {
            "" => continue,
            "quit" | "exit" => break,
            "show" => {}
            "poll" => {
                session.poll();
            }
            "add" => report(session.apply(Intent::AddTask(argument.to_string())).applied),
            "toggle" | "remove" | "submit" => {
                let intent = match command {
                    "submit" => Some(Intent::SubmitDay),
                    "toggle" => task_at(&session, argument).map(Intent::ToggleTask),
                    _ => task_at(&session, argument).map(Intent::RemoveTask),
                };
                report(intent.is_some_and(|intent| session.apply(intent).applied));
            }
            other => {
                println!("unknown command `{other}`");
                continue;
            }
        }
        print_snapshot(&session.snapshot());
        let _ = io::stdout().flush();
    }
    ExitCode::SUCCESS
}

fn load_config(path: Option<String>) -> Result<TrackerConfig, String> {
    let Some(path) = path else {
        return Ok(TrackerConfig::default());
    };
    let raw = std::fs::read_to_string(&path)
        .map_err(|err| format!("failed to read config `{path}`: {err}"))?;
    TrackerConfig::from_json_str(&raw).map_err(|err| format!("config `{path}`: {err}"))
}

fn split_command(line: &str) -> (&str, &str) {
    let trimmed = line.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    }
}

fn task_at(session: &TrackerSession, position: &str) -> Option<TaskId> {
    let index = position.parse::<usize>().ok()?.checked_sub(1)?;
    session.store().tasks().get(index).map(|task| task.id())
}

fn report(applied: bool) {
    if !applied {
        println!("(ignored)");
    }
}

fn print_snapshot(snapshot: &TrackerSnapshot) {
    if let Some(label) = &snapshot.day_label {
        println!("Date: {label}");
    }
    let bar: String = snapshot
        .progress_segments
        .iter()
        .map(|filled| if *filled { '#' } else { '.' })
        .collect();
    println!(
        "Level {} [{bar}] {} task(s) until next level ({})",
        snapshot.level, snapshot.tasks_until_next_level, snapshot.flower_asset
    );
    for (index, task) in snapshot.tasks.iter().enumerate() {
        let mark = if task.completed { 'x' } else { ' ' };
        println!("  {}. [{mark}] {}", index + 1, task.name);
    }
    if let Some(pending) = snapshot.settle_pending_ms {
        println!("  level-up pending in {pending}ms (run `poll`)");
    }
}
