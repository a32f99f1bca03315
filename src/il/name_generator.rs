use super::Name;

/// Hands out temporary names from a monotonically increasing counter.
#[derive(Debug, Default)]
pub struct NameGenerator {
    index: usize,
}

impl NameGenerator {
    pub fn new() -> Self {
        Self { index: 0 }
    }

    /// Generates a new unique temporary name.
    pub fn next_temp(&mut self) -> Name {
        let name = Name::Temp(self.index);
        self.index += 1;
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_temp_generates_ascending_temp_values() {
        let mut name_gen = NameGenerator::new();

        assert_eq!("t0", name_gen.next_temp().to_string());
        assert_eq!("t1", name_gen.next_temp().to_string());
    }
}
