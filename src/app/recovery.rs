#[must_use]
pub fn get_suggestions(msg: &str) -> Vec<String> {
    let mut suggestions = Vec::new();
    let msg_lower = msg.to_lowercase();

    if msg_lower.contains("corrupt or not valid") {
        suggestions.push(
            "Set [editor] encoding in ~/.config/scrivo/config.toml to the file's encoding".to_string(),
        );
    }

    if msg_lower.contains("cannot be represented") {
        suggestions.push("Switch [editor] encoding to \"utf-8\" to save any text".to_string());
        suggestions.push("Or remove the characters the encoding cannot hold".to_string());
    }

    if msg_lower.contains("no such file") || msg_lower.contains("not found") {
        suggestions.push("Check the path; relative paths start at the launch directory".to_string());
    }

    if msg_lower.contains("permission denied") {
        suggestions.push("Use Save As to write the document somewhere writable".to_string());
    }

    if msg_lower.contains("is a directory") {
        suggestions.push("Enter a file name, not a directory".to_string());
    }

    suggestions
}
