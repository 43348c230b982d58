use sweeper_core::{CellView, GameSession, MinePlacer, SessionState};

pub fn cell_char(view: CellView) -> char {
    match view {
        CellView::Hidden => '#',
        CellView::Flagged => 'F',
        CellView::Open(0) => '.',
        CellView::Open(count) => char::from(b'0' + count),
        CellView::Mine => '*',
        CellView::Exploded => 'X',
    }
}

/// Text grid with column digits on top and row numbers on the left, followed by a status
/// line.
pub fn render<P: MinePlacer>(session: &GameSession<P>) -> String {
    let (_, cols) = session.size();
    let mut out = String::from("    ");
    for col in 0..cols {
        out.push(char::from(b'0' + col % 10));
        out.push(' ');
    }
    trim_line(&mut out);

    let mut current_row = None;
    for ((row, _), view) in session.views() {
        if current_row != Some(row) {
            current_row = Some(row);
            trim_line(&mut out);
            out.push_str(&format!("{:>3} ", row));
        }
        out.push(cell_char(view));
        out.push(' ');
    }
    trim_line(&mut out);

    out.push_str(&format!(
        "{}  mines left: {}",
        state_label(session.state()),
        session.mines_left()
    ));
    out
}

fn trim_line(out: &mut String) {
    out.truncate(out.trim_end().len());
    out.push('\n');
}

pub fn state_label(state: SessionState) -> &'static str {
    match state {
        SessionState::NotStarted => "ready",
        SessionState::InProgress => "playing",
        SessionState::Won => "won",
        SessionState::Lost => "lost",
    }
}
