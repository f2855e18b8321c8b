/// Copy of the displayed word, truncated on a char boundary to `N` bytes.
struct WordBuffer<const N: usize> {
    text: String<N>,
}

impl<const N: usize> WordBuffer<N> {
    const fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    fn clear(&mut self) {
        self.text.clear();
    }

    fn set(&mut self, word: &str) {
        self.text.clear();

        for ch in word.chars() {
            if self.text.push(ch).is_err() {
                break;
            }
        }

        if self.text.is_empty() && !word.is_empty() {
            let _ = self.text.push('?');
        }
    }

    fn as_str(&self) -> &str {
        self.text.as_str()
    }
}
