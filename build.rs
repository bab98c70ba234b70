const COMMANDS: &[&str] = &["invoke_method"];

fn main() {
    // Generates the allow/deny permissions for the plugin's commands
    tauri_plugin::Builder::new(COMMANDS).build();
}
