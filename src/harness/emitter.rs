//! Indentation-aware buffer the generated `main.cpp` is assembled in.

const INDENT_UNIT: &str = "    ";

/// Accumulates C++ source text, tracking the current nesting depth so every
/// emitted line lands at the right indentation.
#[derive(Debug, Default)]
pub struct CppEmitter {
    buffer: String,
    depth: usize,
}

impl CppEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the emitter and return the assembled source.
    pub fn finish(self) -> String {
        self.buffer
    }

    /// One line at the current depth.
    pub fn line(&mut self, s: &str) {
        self.push_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
    }

    /// Raw text, no indentation or newline added. Used for preformatted
    /// runtime snippets and the user's source.
    pub fn write(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    pub fn blank_line(&mut self) {
        self.buffer.push('\n');
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn include(&mut self, header: &str) {
        self.line(&format!("#include <{}>", header));
    }

    pub fn comment(&mut self, text: &str) {
        self.line(&format!("// {}", text));
    }

    /// `header {` ... `}` with the body one level deeper.
    pub fn block<F>(&mut self, header: &str, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.line(&format!("{} {{", header));
        self.indent();
        f(self);
        self.dedent();
        self.line("}");
    }

    fn push_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(INDENT_UNIT);
        }
    }
}
