use crate::core::config::data::Config;
use crate::core::constants::DEFAULT_BASE_URL;

impl Config {
    /// Render the configuration the way `mistral-chat show` prints it.
    pub fn describe(&self) -> Vec<String> {
        let mut lines = vec!["Current configuration:".to_string()];
        match &self.base_url {
            Some(url) => lines.push(format!("  base-url: {url}")),
            None => lines.push(format!("  base-url: (unset, default {DEFAULT_BASE_URL})")),
        }
        match &self.theme {
            Some(theme) => lines.push(format!("  theme: {theme}")),
            None => lines.push("  theme: (unset)".to_string()),
        }
        match &self.end_marker {
            Some(marker) => lines.push(format!("  end-marker: {marker}")),
            None => lines.push(format!("  end-marker: (unset, default {})", self.end_marker())),
        }
        let template = self.prompt_template();
        let source = if self.prompt_template.is_some() {
            "custom"
        } else {
            "default"
        };
        lines.push(format!("  prompt-template ({source}):"));
        lines.push(format!(
            "    user: {:?} ... {:?}",
            template.user_prefix, template.user_suffix
        ));
        lines.push(format!(
            "    assistant: {:?} ... {:?}",
            template.assistant_prefix, template.assistant_suffix
        ));
        lines
    }

    pub fn print_all(&self) {
        for line in self.describe() {
            println!("{line}");
        }
    }
}
