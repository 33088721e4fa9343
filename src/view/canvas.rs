use std::io::{self, Write};

use keegol::{pos, Pos};
use termion::{clear, cursor::Goto, style};

/// A screen sized character buffer, drawn in one go.
pub struct Canvas {
    lines: Vec<Vec<char>>,
    highlight: Option<Pos>,
    status: String,
}

impl Canvas {
    /// fills the terminal, keeping the last line for the status bar.
    pub fn from_screen() -> io::Result<Self> {
        let (width, height) = termion::terminal_size()?;
        Ok(Self::new(width as usize, height.saturating_sub(1) as usize))
    }

    pub fn new(width: usize, height: usize) -> Self {
        Self {
            lines: vec![vec![' '; width]; height],
            highlight: None,
            status: String::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.lines.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// writes a character at a screen position, ignoring anything off screen.
    pub fn put(&mut self, Pos { row, col }: Pos, c: char) {
        if row < 0 || col < 0 {
            return;
        }
        if let Some(cell) = self
            .lines
            .get_mut(row as usize)
            .and_then(|line| line.get_mut(col as usize))
        {
            *cell = c;
        }
    }

    pub fn highlight(&mut self, pos: Pos) {
        self.highlight = Some(pos);
    }

    pub fn status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn display(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "{}", clear::All)?;
        for (index, line) in self.lines.iter().enumerate() {
            write!(out, "{}", Goto(1, index as u16 + 1))?;
            match self.highlight {
                Some(Pos { row, col }) if row as usize == index && (col as usize) < line.len() => {
                    let (before, rest) = line.split_at(col as usize);
                    let (lit, after) = rest.split_at(1);
                    let before: String = before.iter().collect();
                    let after: String = after.iter().collect();
                    write!(
                        out,
                        "{before}{}{}{}{after}",
                        style::Invert,
                        lit[0],
                        style::Reset
                    )?;
                }
                _ => write!(out, "{}", line.iter().collect::<String>())?,
            }
        }
        let status: String = self.status.chars().take(self.width()).collect();
        write!(out, "{}{status}", Goto(1, self.height() as u16 + 1))?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_clips() {
        let mut canvas = Canvas::new(3, 2);
        canvas.put(pos!(0, 0), '#');
        canvas.put(pos!(1, 2), '#');
        canvas.put(pos!(2, 0), '#');
        canvas.put(pos!(0, -1), '#');
        assert_eq!(canvas.lines, vec![vec!['#', ' ', ' '], vec![' ', ' ', '#']]);
    }

    #[test]
    fn test_display_highlights() {
        let mut canvas = Canvas::new(5, 1);
        canvas.put(pos!(0, 1), '#');
        canvas.highlight(pos!(0, 1));
        canvas.status("gen 4");
        let mut out = vec![];
        canvas.display(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains(&format!(" {}#{} ", style::Invert, style::Reset)));
        assert!(out.ends_with("gen 4"));
    }

    #[test]
    fn test_status_is_cut_to_width() {
        let mut canvas = Canvas::new(3, 1);
        canvas.status("gen 4");
        let mut out = vec![];
        canvas.display(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.ends_with("gen"));
        assert!(!out.contains("gen 4"));
    }
}
