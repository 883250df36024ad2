use std::collections::HashMap;

/// Resolves `$VARIABLE` references in layout strings
pub struct Tpl {
    variables: HashMap<String, String>,
}

impl Tpl {
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
        }
    }

    /// Register a variable with its value
    pub fn register<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.variables.insert(key.into(), value.into());
    }

    /// Replace every registered `$KEY` in `input`.
    ///
    /// Longer keys are substituted first so `$NAME` never clobbers the
    /// prefix of a `$NAMESPACE` variable. Unknown references stay as-is.
    pub fn parse(&self, input: &str) -> String {
        let mut keys: Vec<&String> = self.variables.keys().collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let mut result = input.to_string();
        for key in keys {
            let pattern = format!("${}", key);
            result = result.replace(&pattern, &self.variables[key]);
        }

        result
    }

    /// Parse a slice of strings
    pub fn parse_vec(&self, input: &[String]) -> Vec<String> {
        input.iter().map(|s| self.parse(s)).collect()
    }
}

impl Default for Tpl {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_layout_variables() {
        let mut tpl = Tpl::new();
        tpl.register("NAME", "otterlang");
        tpl.register("BINARY", "otter");

        assert_eq!(tpl.parse("$NAME/DEBIAN"), "otterlang/DEBIAN");
        assert_eq!(tpl.parse("../target/release/$BINARY"), "../target/release/otter");
    }

    #[test]
    fn longer_keys_win_over_prefixes() {
        let mut tpl = Tpl::new();
        tpl.register("NAME", "otterlang");
        tpl.register("NAMESPACE", "lang");

        assert_eq!(tpl.parse("$NAMESPACE-$NAME"), "lang-otterlang");
    }

    #[test]
    fn unknown_variables_are_left_alone() {
        let mut tpl = Tpl::new();
        tpl.register("NAME", "otterlang");

        assert_eq!(tpl.parse("$NAME_$VERSION.deb"), "otterlang_$VERSION.deb");
    }

    #[test]
    fn parses_every_entry() {
        let mut tpl = Tpl::new();
        tpl.register("ARCH", "amd64");

        let parsed = tpl.parse_vec(&["control".to_string(), "notes-$ARCH".to_string()]);
        assert_eq!(parsed, vec!["control", "notes-amd64"]);
    }
}
