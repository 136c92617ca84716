//! Unit tests for host locale helpers.

use anyhow::{Result, ensure};
use lexis::locale_resolution::{normalize_locale_tag, preference_from_locale, system_preference};
use rstest::rstest;
use test_support::locale_stubs::StubSystemLocale;

#[rstest]
#[case("en_US.UTF-8", Some("en-US"))]
#[case("es_ES", Some("es-ES"))]
#[case("pt_BR@latin", Some("pt-BR"))]
#[case("  en-GB  ", Some("en-GB"))]
#[case("C", None)]
#[case("C.UTF-8", None)]
#[case("POSIX", None)]
#[case("12", None)]
#[case("", None)]
fn normalize_locale_tag_handles_common_formats(
    #[case] raw: &str,
    #[case] expected: Option<&str>,
) -> Result<()> {
    let normalized = normalize_locale_tag(raw);
    ensure!(
        normalized.as_deref() == expected,
        "expected {:?} to normalize to {:?}, got {:?}",
        raw,
        expected,
        normalized
    );
    Ok(())
}

#[rstest]
#[case("pt_BR.UTF-8", Some("pt-BR,pt;q=0.9"))]
#[case("en", Some("en"))]
#[case("POSIX", None)]
fn host_locales_expand_to_primary_language(
    #[case] raw: &str,
    #[case] expected: Option<&str>,
) -> Result<()> {
    let preference = preference_from_locale(raw);
    ensure!(
        preference.as_deref() == expected,
        "expected {raw:?} to give {expected:?}, got {preference:?}"
    );
    Ok(())
}

#[rstest]
fn system_preference_reads_the_provider() -> Result<()> {
    let host = StubSystemLocale::with_locale("es_MX");
    ensure!(
        system_preference(&host).as_deref() == Some("es-MX,es;q=0.9"),
        "host locale should become a preference"
    );
    ensure!(
        system_preference(&StubSystemLocale::default()).is_none(),
        "no host locale yields no preference"
    );
    Ok(())
}
