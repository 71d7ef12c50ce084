//! Per-render color table

use std::collections::HashMap;

use crate::syntax::{Color, StyleSheet};

/// Distinct colors of a style sheet, numbered from 1 in first-seen order.
///
/// Index 0 is the RTF "auto" color and is never assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTable {
    colors: Vec<Color>,
    ids: HashMap<Color, usize>,
}

impl ColorTable {
    /// Scan the sheet's entries in order; each style contributes its
    /// foreground, background and border colors, in that order.
    pub fn from_style_sheet(sheet: &StyleSheet) -> Self {
        let mut table = Self::default();
        for (_, style) in sheet.entries() {
            for color in style.colors() {
                table.insert(color);
            }
        }
        tracing::debug!(sheet = %sheet.name, colors = table.len(), "built color table");
        table
    }

    /// Id of a color, assigning the next one if it is new
    pub fn insert(&mut self, color: Color) -> usize {
        if let Some(&id) = self.ids.get(&color) {
            return id;
        }
        self.colors.push(color);
        let id = self.colors.len();
        self.ids.insert(color, id);
        id
    }

    /// Id of a known color
    pub fn id(&self, color: Color) -> Option<usize> {
        self.ids.get(&color).copied()
    }

    /// Colors in id order
    pub fn iter(&self) -> impl Iterator<Item = (usize, Color)> + '_ {
        self.colors.iter().enumerate().map(|(i, c)| (i + 1, *c))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{standard, Style};

    const RED: Color = Color::rgb(255, 0, 0);
    const GREEN: Color = Color::rgb(0, 255, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    #[test]
    fn test_first_seen_order() {
        let mut sheet = StyleSheet::new("test");
        sheet.set(standard::KEYWORD, Style::fg(GREEN).with_bg(RED));
        sheet.set(standard::NAME, Style::fg(RED).with_border(BLUE));
        sheet.set(standard::COMMENT, Style::default().with_italic());

        let table = ColorTable::from_style_sheet(&sheet);
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![(1, GREEN), (2, RED), (3, BLUE)]);
        assert_eq!(table.id(RED), Some(2));
        assert_eq!(table.id(Color::rgb(1, 1, 1)), None);
    }

    #[test]
    fn test_deterministic() {
        let sheet = StyleSheet::default_sheet();
        assert_eq!(
            ColorTable::from_style_sheet(&sheet),
            ColorTable::from_style_sheet(&sheet)
        );
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut table = ColorTable::default();
        assert_eq!(table.insert(BLUE), 1);
        assert_eq!(table.insert(RED), 2);
        assert_eq!(table.insert(BLUE), 1);
        assert_eq!(table.len(), 2);
    }
}
