//! Diagnostic Reporting
//! Computation never prints directly; everything human-facing goes
//! through this trait so tests can assert on structures instead of stdout.

/// Minimal sink for human-readable diagnostics.
pub trait Reporter {
    fn emit_summary(&self, text: &str);
}

/// Writes diagnostics to standard output.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn emit_summary(&self, text: &str) {
        println!("{text}");
    }
}

/// Buffers diagnostics in memory for assertions.
#[cfg(test)]
pub struct MemoryReporter {
    lines: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MemoryReporter {
    pub fn new() -> Self {
        Self {
            lines: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn joined(&self) -> String {
        self.lines.lock().unwrap().join("\n")
    }
}

#[cfg(test)]
impl Reporter for MemoryReporter {
    fn emit_summary(&self, text: &str) {
        self.lines.lock().unwrap().push(text.to_string());
    }
}
