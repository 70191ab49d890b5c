use colored::Colorize;
use wpcmd::catalog::CommandKey;
use wpcmd::commands::{CmdMessage, MessageLevel};

pub(super) fn print_message(message: &CmdMessage) {
    let text = message.to_text();
    match message.level {
        MessageLevel::Info => println!("{}", text),
        MessageLevel::Success => println!("{}", text.green()),
        MessageLevel::Notice => println!("{}", text.yellow()),
        MessageLevel::Error => println!("{}", text.red()),
    }
}

pub(super) fn print_error(text: &str) {
    println!("{}", format!("Error: {}", text).red());
}

pub(super) fn print_commands(commands: &[(CommandKey, bool)]) {
    let width = commands
        .iter()
        .map(|(key, _)| key.as_str().len())
        .max()
        .unwrap_or(0);

    for (key, active) in commands {
        let status = if *active {
            "active".green()
        } else {
            "inactive".dimmed()
        };
        println!(
            "{:<width$}  {:<8}  {}",
            key.as_str(),
            status,
            key.descriptor().description,
            width = width
        );
    }
}

pub(super) fn print_setting(key: &str, value: &str) {
    println!("{} = {}", key, value);
}
