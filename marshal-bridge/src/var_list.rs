// Native variable declarations for one generated call, grouped by C type.

use std::fmt;

/// Collects `type -> [declarator]` pairs, keeping the order in which each
/// type was first seen and the order of declarators within a type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarList {
    vars: Vec<(String, Vec<String>)>,
}

impl VarList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declarator (`*name = NULL`, `ret[2]`, ...) under `c_type`.
    /// Duplicates are kept verbatim.
    pub fn add(&mut self, c_type: impl Into<String>, name: impl Into<String>) {
        let c_type = c_type.into();
        let name = name.into();
        match self.vars.iter_mut().find(|(ty, _)| *ty == c_type) {
            Some((_, names)) => names.push(name),
            None => self.vars.push((c_type, vec![name])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Number of distinct declared types.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Renders one `\t<type> a, b;` line per type plus a blank separator,
    /// or nothing at all when no variable was added.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VarList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (c_type, names) in &self.vars {
            writeln!(f, "\t{} {};", c_type, names.join(", "))?;
        }
        if !self.vars.is_empty() {
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_groups_by_first_seen_type() {
        let mut vars = VarList::new();
        vars.add("int", "x");
        vars.add("int", "y=2");
        vars.add("char", "z");
        assert_eq!(vars.render(), "\tint x, y=2;\n\tchar z;\n\n");
    }

    #[test]
    fn test_interleaved_types_stay_grouped() {
        let mut vars = VarList::new();
        vars.add("zval", "*php_a = NULL");
        vars.add("long", "b");
        vars.add("zval", "*php_c = NULL");
        assert_eq!(vars.len(), 2);
        assert_eq!(
            vars.render(),
            "\tzval *php_a = NULL, *php_c = NULL;\n\tlong b;\n\n"
        );
    }

    #[test]
    fn test_empty_renders_nothing() {
        let vars = VarList::new();
        assert!(vars.is_empty());
        assert_eq!(vars.render(), "");
    }

    #[test]
    fn test_duplicates_are_preserved() {
        let mut vars = VarList::new();
        vars.add("long", "n");
        vars.add("long", "n");
        assert_eq!(vars.render(), "\tlong n, n;\n\n");
    }
}
