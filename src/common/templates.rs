/// Templates module for embedded YAML templates

/// Get the default relgit.yaml template content
/// The template is embedded at compile time using include_str! macro
pub fn get_relgit_template() -> &'static str {
    include_str!("../../templates/relgit.yaml")
}
