//! Loader tests against in-memory extracts.

use ubisim_core::error::SimError;
use ubisim_core::loader::load_persons_from_reader;

const EXTRACT: &str = "\
MARSUPWT,SPM_ID,SPM_POVTHRESHOLD,SPM_RESOURCES,A_AGE,TAX_INC,SPM_WEIGHT,SPM_NUMPER,PERIDNUM
1000,1,20000,15000,35,12000,1000,3,900001
500,1,20000,15000,17,,1000,3,900002
2000,2,25000,60000,45,50000,2000,2,900003
";

#[test]
fn parses_uppercase_headers_and_normalizes_weights() {
    let persons = load_persons_from_reader(EXTRACT.as_bytes()).unwrap();
    assert_eq!(persons.len(), 3);

    assert_eq!(persons[0].weight, 10.0); // MARSUPWT / 100
    assert_eq!(persons[0].spm_weight, 10.0);
    assert_eq!(persons[2].weight, 20.0);
    assert_eq!(persons[0].spm_id, 1);
    assert_eq!(persons[2].spm_id, 2);
}

#[test]
fn derives_age_flags_at_the_18_boundary() {
    let persons = load_persons_from_reader(EXTRACT.as_bytes()).unwrap();

    assert!(persons[0].is_adult && !persons[0].is_child); // 35
    assert!(persons[1].is_child && !persons[1].is_adult); // 17
    assert!(persons[2].is_adult); // 45
}

#[test]
fn empty_taxable_income_defaults_to_zero() {
    let persons = load_persons_from_reader(EXTRACT.as_bytes()).unwrap();
    assert_eq!(persons[1].taxable_income, 0.0);
    assert_eq!(persons[2].taxable_income, 50_000.0);
}

#[test]
fn unknown_columns_are_ignored() {
    // PERIDNUM is not part of the schema; loading must still succeed.
    let persons = load_persons_from_reader(EXTRACT.as_bytes()).unwrap();
    assert_eq!(persons.len(), 3);
}

#[test]
fn missing_required_column_is_fatal() {
    let extract = "\
MARSUPWT,SPM_POVTHRESHOLD,SPM_RESOURCES,A_AGE,TAX_INC,SPM_WEIGHT,SPM_NUMPER
1000,20000,15000,35,12000,1000,3
";
    let err = load_persons_from_reader(extract.as_bytes()).unwrap_err();
    match err {
        SimError::MissingColumn(col) => assert_eq!(col, "spm_id"),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn missing_tax_inc_column_is_fatal() {
    // Without the taxable-income column every person would load with a
    // zero tax base, so the column itself is required even though empty
    // values in it are fine.
    let extract = "\
MARSUPWT,SPM_ID,SPM_POVTHRESHOLD,SPM_RESOURCES,A_AGE,SPM_WEIGHT,SPM_NUMPER
1000,1,20000,15000,35,1000,3
";
    let err = load_persons_from_reader(extract.as_bytes()).unwrap_err();
    match err {
        SimError::MissingColumn(col) => assert_eq!(col, "tax_inc"),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn header_only_extract_is_fatal() {
    let extract =
        "MARSUPWT,SPM_ID,SPM_POVTHRESHOLD,SPM_RESOURCES,A_AGE,TAX_INC,SPM_WEIGHT,SPM_NUMPER\n";
    let err = load_persons_from_reader(extract.as_bytes()).unwrap_err();
    assert!(matches!(err, SimError::EmptyInput));
}
