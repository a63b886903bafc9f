use crate::styles;
use anyhow::Result;
use claimcheck_checker::render::View;
use ratatui::{
    Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout, Position},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use textwrap::wrap;

/// Everything [`draw`] needs, copied out of the actor.
pub struct ViewSnap {
    pub endpoint: String,
    pub input: String,
    pub input_cursor: usize,
    pub view: View,
    /// Replaces the result region while set (e.g. `/help`).
    pub notice: Option<Vec<String>>,
    /// Lines scrolled down from the top of the result region.
    pub scroll: usize,
    pub in_flight: usize,
    pub spinner: &'static str,
}

pub fn draw<B: Backend>(term: &mut Terminal<B>, snap: &ViewSnap) -> Result<()> {
    term.draw(|frame| {
        let area = frame.area();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        let header = Paragraph::new(Line::from(vec![
            Span::styled(" Claim Check ", styles::title()),
            Span::styled(format!("→ {}", snap.endpoint), styles::dim()),
        ]))
        .wrap(Wrap { trim: true });
        frame.render_widget(header, layout[0]);

        // Result region
        let visible_h = layout[1].height.saturating_sub(2) as usize;
        let content_width = layout[1].width.saturating_sub(2) as usize;
        let wrapped = wrap_lines(&result_lines(snap), content_width);
        let start = snap.scroll.min(wrapped.len().saturating_sub(visible_h));
        let end = (start + visible_h).min(wrapped.len());

        let items: Vec<ListItem> = wrapped[start..end]
            .iter()
            .map(|(text, style)| ListItem::new(Line::from(Span::styled(text.clone(), *style))))
            .collect();
        let body = List::new(items).block(Block::default().borders(Borders::ALL).title(" Result "));
        frame.render_widget(body, layout[1]);

        let input_box = Paragraph::new(snap.input.clone())
            .block(Block::default().borders(Borders::ALL).title(" Claim "));
        frame.render_widget(Clear, layout[2]);
        frame.render_widget(input_box, layout[2]);

        let caret_x = layout[2].x + 1 + visual_caret_col(&snap.input, snap.input_cursor);
        let caret_y = layout[2].y + 1;
        frame.set_cursor_position(Position {
            x: caret_x,
            y: caret_y,
        });

        let status_line = Line::from(vec![
            Span::raw(" "),
            Span::styled(snap.spinner, styles::busy()),
            Span::raw(" "),
            if snap.in_flight > 0 {
                Span::styled("Checking…", styles::busy())
            } else {
                Span::styled("Ready", styles::idle())
            },
            Span::raw(format!(" • in flight: {}", snap.in_flight)),
            Span::styled("  Enter submit • Esc clear • /help • Ctrl-C quit", styles::dim()),
        ]);
        let status = Paragraph::new(status_line)
            .block(Block::default().borders(Borders::ALL).title(" Status "));
        frame.render_widget(status, layout[3]);
    })?;

    Ok(())
}

fn result_lines(snap: &ViewSnap) -> Vec<(String, Style)> {
    if let Some(notice) = &snap.notice {
        return notice
            .iter()
            .map(|line| (line.clone(), styles::value()))
            .collect();
    }

    let view = &snap.view;
    let mut out = vec![(view.headline.clone(), styles::headline(view.tone))];

    let mut field = |label: &str, value: &Option<String>| {
        if let Some(value) = value {
            out.push((String::new(), Style::default()));
            out.push((label.to_string(), styles::label()));
            if value.is_empty() {
                out.push(("  (none)".to_string(), styles::dim()));
            } else {
                out.push((format!("  {value}"), styles::value()));
            }
        }
    };
    field("Claim:", &view.claim);
    field("Explanation:", &view.explanation);
    field("Search query:", &view.search_query);

    if let Some(sources) = &view.sources {
        out.push((String::new(), Style::default()));
        if sources.is_empty() {
            out.push(("Sources: (none)".to_string(), styles::dim()));
        } else {
            out.push(("Sources:".to_string(), styles::label()));
            for source in sources {
                out.push((format!("  • {source}"), styles::value()));
            }
        }
    }

    out
}

fn visual_caret_col(input: &str, cursor: usize) -> u16 {
    use unicode_width::UnicodeWidthStr;
    UnicodeWidthStr::width(&input[..cursor]) as u16
}

fn wrap_lines(lines: &[(String, Style)], width: usize) -> Vec<(String, Style)> {
    let effective_width = width.max(1);
    let mut out = Vec::new();

    for (text, style) in lines {
        for raw_line in text.split('\n') {
            let segments = wrap(raw_line, effective_width);
            if segments.is_empty() {
                out.push((String::new(), *style));
            } else {
                out.extend(segments.into_iter().map(|seg| (seg.into_owned(), *style)));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimcheck_checker::DisplayState;
    use claimcheck_detect::VerdictResponse;
    use ratatui::backend::TestBackend;

    fn snap(view: View) -> ViewSnap {
        ViewSnap {
            endpoint: "http://localhost:8000/detect".into(),
            input: String::new(),
            input_cursor: 0,
            view,
            notice: None,
            scroll: 0,
            in_flight: 0,
            spinner: " ",
        }
    }

    fn screen(snap: &ViewSnap) -> Vec<String> {
        let mut term = Terminal::new(TestBackend::new(80, 24)).unwrap();
        draw(&mut term, snap).unwrap();
        let buffer = term.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect()
    }

    #[test]
    fn verdict_fields_are_drawn() {
        let state = DisplayState::Verdict {
            ticket: 1,
            claim: "The moon is made of cheese".into(),
            verdict: moon_verdict(),
        };
        let rows = screen(&snap(View::from(&state)));
        let all = rows.join("\n");

        assert!(all.contains("Verdict: False"));
        assert!(all.contains("No evidence supports this."));
        assert!(all.contains("moon composition"));
        assert!(all.contains("• nasa.gov"));
    }

    #[test]
    fn notice_replaces_result() {
        let mut s = snap(View::from(&DisplayState::Idle));
        s.notice = Some(vec!["Commands:".into(), "  /quit  exit".into()]);
        let all = screen(&s).join("\n");
        assert!(all.contains("/quit  exit"));
        assert!(!all.contains("Enter a claim to check."));
    }

    #[test]
    fn wrapping_keeps_blank_lines() {
        let lines = vec![
            ("aaaa bbbb".to_string(), Style::default()),
            (String::new(), Style::default()),
        ];
        let wrapped = wrap_lines(&lines, 4);
        let texts: Vec<&str> = wrapped.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(texts, vec!["aaaa", "bbbb", ""]);
    }

    #[test]
    fn caret_counts_display_width() {
        assert_eq!(visual_caret_col("ab", 2), 2);
        assert_eq!(visual_caret_col("月x", "月".len()), 2);
    }

    fn moon_verdict() -> VerdictResponse {
        VerdictResponse {
            verdict: "False".into(),
            explanation: "No evidence supports this.".into(),
            search_query: "moon composition".into(),
            sources: vec!["nasa.gov".into()],
            raw: None,
        }
    }
}
