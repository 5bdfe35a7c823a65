use l10n_extract::reference::build_reference;

#[test]
fn test_reference_without_placeholders() {
    let names: Vec<String> = Vec::new();
    assert_eq!(
        build_reference("AppLocalizations.of(context)!", "save", &names),
        "AppLocalizations.of(context)!.save"
    );
}

#[test]
fn test_reference_keeps_placeholder_order_and_repeats() {
    let names = ["a", "b", "a"];
    assert_eq!(build_reference("l10n", "pair", &names), "l10n.pair(a, b, a)");
}
