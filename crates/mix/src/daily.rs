use mixwise_shared::{Cocktail, CocktailId};
use time::{Date, OffsetDateTime};
use time_tz::{ToTimezone, timezones};

/// `YYYY-MM-DD` form of a calendar date, the input of [`daily_hash`].
pub fn date_key(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Rolling `hash * 31 + code_unit` over UTF-16 code units, wrapping like a
/// 32-bit signed integer. The mapping must stay stable across releases.
pub fn daily_hash(key: &str) -> i32 {
    key.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_mul(31).wrapping_add(i32::from(unit))
    })
}

/// Index of the cocktail of the day in a list of `count` cocktails, or `None`
/// when there is nothing to pick from.
pub fn daily_index(count: usize, local_date: Date) -> Option<usize> {
    if count == 0 {
        return None;
    }

    let hash = daily_hash(&date_key(local_date));

    Some(hash.unsigned_abs() as usize % count)
}

pub fn daily_cocktail(cocktails: &[Cocktail], local_date: Date) -> Option<&Cocktail> {
    daily_index(cocktails.len(), local_date).and_then(|index| cocktails.get(index))
}

pub fn is_todays_daily(cocktail_id: &CocktailId, cocktails: &[Cocktail], local_date: Date) -> bool {
    daily_cocktail(cocktails, local_date).is_some_and(|cocktail| &cocktail.id == cocktail_id)
}

/// Calendar date of `instant` as seen by someone in `timezone` (IANA name).
///
/// Unknown or missing zones keep the offset the instant already carries.
pub fn local_date(instant: OffsetDateTime, timezone: Option<&str>) -> Date {
    let Some(name) = timezone else {
        return instant.date();
    };

    match timezones::get_by_name(name) {
        Some(tz) => instant.to_timezone(tz).date(),
        None => {
            tracing::warn!(timezone = %name, "Unknown timezone, using the instant offset");
            instant.date()
        }
    }
}
