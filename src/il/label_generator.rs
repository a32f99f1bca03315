use super::Label;

/// Hands out labels. One generator serves the whole program, so labels never repeat across
/// functions.
#[derive(Debug, Default)]
pub struct LabelGenerator {
    index: usize,
}
impl LabelGenerator {
    pub fn new() -> Self {
        Self { index: 0 }
    }

    /// Generates a new unique label.
    pub fn next_label(&mut self) -> Label {
        let label = Label(self.index);
        self.index += 1;
        label
    }
}
