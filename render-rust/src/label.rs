/// Derive a display label from a payload key: `tujuan_pembelajaran`
/// becomes `Tujuan Pembelajaran`.
#[must_use]
pub fn format_label(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_each_word() {
        assert_eq!(format_label("tujuan_pembelajaran"), "Tujuan Pembelajaran");
        assert_eq!(format_label("alat"), "Alat");
        assert_eq!(format_label("kata_frase_KUNCI"), "Kata Frase KUNCI");
        assert_eq!(format_label("_leading__double_"), "Leading Double");
        assert_eq!(format_label(""), "");
    }
}
