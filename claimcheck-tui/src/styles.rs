use claimcheck_checker::render::Tone;
use ratatui::style::{Color, Modifier, Style};

pub fn headline(tone: Tone) -> Style {
    let color = match tone {
        Tone::Neutral => Color::Gray,
        Tone::Busy => Color::Yellow,
        Tone::Supported => Color::LightGreen,
        Tone::Refuted => Color::LightRed,
        Tone::Uncertain => Color::LightYellow,
        Tone::Error => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn title() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn label() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub fn value() -> Style {
    Style::default().fg(Color::White)
}

pub fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn busy() -> Style {
    Style::default().fg(Color::Yellow)
}

pub fn idle() -> Style {
    Style::default().fg(Color::Green)
}
