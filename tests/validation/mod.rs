use validation_rail::validation::Validation;

#[test]
fn zip_accumulates_both_sides() {
    let left = Validation::<&str, i32>::invalid("duplicate embed");
    let right = Validation::<&str, i32>::from_errors(0, ["missing relation", "unknown rule"]);

    let errors = left.zip(right).into_errors().unwrap();
    assert_eq!(
        errors.as_slice(),
        ["duplicate embed", "missing relation", "unknown rule"]
    );
}

#[test]
fn collect_keeps_values_when_all_valid() {
    let collected: Validation<&str, Vec<i32>> =
        (1..=3).map(Validation::valid).collect();

    assert_eq!(collected.into_value(), Some(vec![1, 2, 3]));
}

#[test]
fn collect_keeps_every_error() {
    let collected: Validation<&str, Vec<i32>> = vec![
        Validation::valid(1),
        Validation::invalid("first"),
        Validation::valid(3),
        Validation::invalid("second"),
    ]
    .into_iter()
    .collect();

    let errors: Vec<&str> = collected.iter_errors().copied().collect();
    assert_eq!(errors, ["first", "second"]);
    assert_eq!(collected.to_result().unwrap_err().len(), 2);
}

#[test]
fn map_leaves_errors_untouched() {
    let valid = Validation::<&str, i32>::valid(2).map(|n| n * 10);
    assert_eq!(valid, Validation::Valid(20));

    let invalid = Validation::<&str, i32>::invalid("bad").map(|n| n * 10);
    assert!(invalid.is_invalid());
    assert_eq!(invalid.iter_errors().count(), 1);
}

#[test]
fn zip_with_one_failing_side_keeps_only_its_problems() {
    let own = Validation::<&str, ()>::valid(());
    let embeds = Validation::<&str, Vec<&str>>::invalid("tasks: missing model name");

    let problems = own.zip(embeds).into_errors().unwrap();
    assert_eq!(problems.as_slice(), ["tasks: missing model name"]);

    let own = Validation::<&str, ()>::invalid("unknown rule 'shout'");
    let embeds = Validation::<&str, Vec<&str>>::valid(vec!["address"]);
    assert_eq!(own.zip(embeds).iter_errors().count(), 1);
}
