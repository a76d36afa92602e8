//! Phone number checks backed by libphonenumber metadata.

/// Whether `phone` is a dialable number for the given calling code.
///
/// A leading `+` on `phone` means it already carries its calling code and
/// `country_code` is ignored. Otherwise the calling code (with or without `+`)
/// is prefixed. Without either, the number cannot be attributed to a region
/// and is rejected. Unparseable input is simply invalid.
pub fn is_phone_valid(phone: &str, country_code: Option<&str>) -> bool {
    let Some(candidate) = international_candidate(phone, country_code) else {
        return false;
    };

    match phonenumber::parse(None, &candidate) {
        Ok(number) => phonenumber::is_valid(&number),
        Err(_) => false,
    }
}

/// Build the `+<code><number>` string handed to the parser.
pub fn international_candidate(phone: &str, country_code: Option<&str>) -> Option<String> {
    let phone = phone.trim();
    if phone.is_empty() {
        return None;
    }

    let candidate = if phone.starts_with('+') {
        phone.to_string()
    } else {
        let code = country_code
            .map(|code| code.trim().trim_start_matches('+'))
            .filter(|code| !code.is_empty())?;
        format!("+{code}{phone}")
    };

    let digits = &candidate[1..];
    let well_formed = (2..=15).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit())
        && !digits.starts_with('0');
    well_formed.then_some(candidate)
}

/// Keep only what a phone input accepts: digits and `+`.
pub fn sanitize_phone_input(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}
