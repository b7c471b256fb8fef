use crate::{Character, Cursor, TextModel};

/// Number of rows shown at once
pub const VISIBLE_ROWS: usize = 3;

/// Everything a renderer needs to draw one character
pub struct RenderingContext<'a> {
    pub character: &'a Character,
    pub word: usize,
    pub index: usize,
    pub has_cursor: bool,
    /// True for the last character of a word that is followed by another word on the row
    pub ends_word: bool,
}

/// The rows to display around the cursor.
///
/// On the first row the cursor row leads, followed by the next two rows. Past the first row the
/// cursor row sits in the middle, between the previous and the next row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWindow {
    pub slots: [Option<usize>; VISIBLE_ROWS],
}

impl RowWindow {
    pub fn around(cursor_row: usize, line_count: usize) -> Self {
        let first = cursor_row.saturating_sub(1);
        let slots = std::array::from_fn(|slot| Some(first + slot).filter(|row| *row < line_count));
        Self { slots }
    }

    /// Present rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().flatten().copied()
    }
}

/// Iterator over the characters of a single row
pub struct RowRenderer<'a> {
    model: &'a TextModel,
    row: usize,
    cursor: Cursor,
    word: usize,
    index: usize,
}

impl<'a> RowRenderer<'a> {
    pub const fn new(model: &'a TextModel, row: usize, cursor: Cursor) -> Self {
        Self {
            model,
            row,
            cursor,
            word: 0,
            index: 0,
        }
    }
}

impl std::iter::FusedIterator for RowRenderer<'_> {}

impl<'a> Iterator for RowRenderer<'a> {
    type Item = RenderingContext<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let model = self.model;
        let line = model.line(self.row)?;
        let word = line.get(self.word)?;
        let character = word.get(self.index)?;

        let (word_index, index) = (self.word, self.index);
        let ends_word = index + 1 == word.len() && word_index + 1 < line.len();
        let has_cursor = self.cursor == Cursor::new(self.row, word_index, index);

        if index + 1 < word.len() {
            self.index += 1;
        } else {
            self.word += 1;
            self.index = 0;
        }

        Some(RenderingContext {
            character,
            word: word_index,
            index,
            has_cursor,
            ends_word,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_window_on_first_row() {
        assert_eq!(
            RowWindow::around(0, 5).slots,
            [Some(0), Some(1), Some(2)]
        );
        assert_eq!(RowWindow::around(0, 2).slots, [Some(0), Some(1), None]);
        assert_eq!(RowWindow::around(0, 1).slots, [Some(0), None, None]);
    }

    #[test]
    fn test_row_window_centers_cursor() {
        assert_eq!(RowWindow::around(1, 5).slots, [Some(0), Some(1), Some(2)]);
        assert_eq!(RowWindow::around(3, 5).slots, [Some(2), Some(3), Some(4)]);
        // Last row has nothing below it
        assert_eq!(RowWindow::around(4, 5).slots, [Some(3), Some(4), None]);
        assert_eq!(RowWindow::around(4, 5).rows().collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn test_row_renderer() {
        let model = TextModel::build("ab c de", 2).unwrap();
        let cursor = Cursor::new(0, 1, 0);

        let rendered: Vec<String> = RowRenderer::new(&model, 0, cursor)
            .map(|ctx| {
                format!(
                    "{}{}{}",
                    ctx.character.as_char(),
                    if ctx.has_cursor { "*" } else { "" },
                    if ctx.ends_word { " " } else { "" }
                )
            })
            .collect();

        assert_eq!(rendered, vec!["a", "b ", "c*"]);

        let second_row: String = RowRenderer::new(&model, 1, cursor)
            .map(|ctx| ctx.character.as_char())
            .collect();
        assert_eq!(second_row, "de");

        assert_eq!(RowRenderer::new(&model, 2, cursor).count(), 0);
    }
}
