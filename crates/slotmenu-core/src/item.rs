//! The [`Icon`] type, a ready-made slot payload for hosts that have no item
//! model of their own.

use std::fmt;

/// What a slot shows: a material, a stack size and some display text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Icon {
    pub material: String,
    pub amount: u8,
    pub display_name: Option<String>,
    pub lore: Vec<String>,
    pub glowing: bool,
}

impl Icon {
    /// A single unnamed item of `material`.
    pub fn new(material: &str) -> Self {
        Self {
            material: material.to_string(),
            amount: 1,
            display_name: None,
            lore: Vec::new(),
            glowing: false,
        }
    }

    /// Set the material (builder).
    pub fn with_material(mut self, material: &str) -> Self {
        self.material = material.to_string();
        self
    }

    /// Set the stack size (builder). Clamped to at least 1.
    pub fn with_amount(mut self, amount: u8) -> Self {
        self.amount = amount.max(1);
        self
    }

    /// Set the display name (builder).
    pub fn with_name(mut self, name: &str) -> Self {
        self.display_name = Some(name.to_string());
        self
    }

    /// Replace the lore lines (builder).
    pub fn with_lore<S: AsRef<str>>(mut self, lines: &[S]) -> Self {
        self.lore = lines.iter().map(|l| l.as_ref().to_string()).collect();
        self
    }

    /// Append one lore line (builder).
    pub fn with_lore_line(mut self, line: &str) -> Self {
        self.lore.push(line.to_string());
        self
    }

    /// Set the enchantment glint (builder).
    pub fn with_glow(mut self, glowing: bool) -> Self {
        self.glowing = glowing;
        self
    }

    /// Apply an arbitrary edit (builder).
    pub fn modify<F: FnOnce(&mut Self)>(mut self, f: F) -> Self {
        f(&mut self);
        self
    }

    /// The text a host should show: the display name, or the material when
    /// unnamed.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.material)
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.amount > 1 {
            write!(f, "{} x{}", self.label(), self.amount)
        } else {
            f.write_str(self.label())
        }
    }
}
