/// Generates a page of `sections` top-level bullets, each with nested
/// children carrying properties and the usual link forms.
pub fn generate_outline(sections: usize) -> String {
    let mut content = String::from("public:: true\nalias:: Bench Page\n");
    for i in 0..sections {
        content.push_str(&format!("- Section {i} about [[Topic {i}]] and #tag{i}\n"));
        content.push_str(&format!("  id:: 00000000-0000-4000-8000-{i:012}\n"));
        content.push_str("\t- Details with `inline [[code]]` and **bold** text\n");
        content.push_str(&format!("\t  continued with ![img](../assets/img{i}.png)\n"));
        content.push_str(&format!("\t\t- See ((00000000-0000-4000-8000-{i:012}))\n"));
        content.push_str("\t\t  public:: false\n");
        content.push_str("\t- [docs](https://example.com/docs) and {{embed [[Other]]}}\n");
    }
    content
}
