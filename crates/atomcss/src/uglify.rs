//! Short opaque class names for uglified output (`.rp__0`, `.rp__1`, ... `.rp__2xh3`).
//!
//! Names are the base-36 text of a counter. Values whose text contains a
//! denylisted substring are skipped: ad blockers hide elements whose class
//! contains `ad`.

/// Prefix of every uglified class name.
pub const UGLIFY_PREFIX: &str = ".rp__";

const DENYLIST: &[&str] = &["ad"];

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Result of one uglifier step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uglified {
    /// The class name, e.g. `.rp__a`.
    pub name: String,
    /// Counter value to use for the next name.
    pub next_index: u64,
}

/// Produces the uglified name for `index`, skipping denylisted values.
pub fn uglify(index: u64) -> Uglified {
    let mut index = index;
    let mut text = to_base36(index);
    while DENYLIST.iter().any(|bad| text.contains(bad)) {
        index += 1;
        text = to_base36(index);
    }
    Uglified {
        name: format!("{}{}", UGLIFY_PREFIX, text),
        next_index: index + 1,
    }
}

/// Lowercase base-36 text of `value`.
pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

/// Per-run counter handing out uglified names in order.
#[derive(Debug, Clone, Default)]
pub struct Uglifier {
    index: u64,
}

impl Uglifier {
    /// A counter seeded at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next name and advances the counter.
    pub fn next_name(&mut self) -> String {
        let Uglified { name, next_index } = uglify(self.index);
        self.index = next_index;
        name
    }
}
