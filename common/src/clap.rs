use std::{
    fmt::{self, Display},
    marker::PhantomData,
    ops::Deref,
    str::FromStr,
};

//
// Secrets redaction
// It is nice to be able to debug print our CLI arguments on startup as this can save a lot of
// time when investigating a failed pipeline run. Some of our CLI arguments are secrets though, so
// we want a way of hiding those values from `Debug` calls without introducing overheads in the
// developer experience.
//
// For this we have `CliSecret` and `RedactionFunction` which you can wrap around values which will modify
// debug print output.
//

pub trait RedactionFunction<T> {
    fn redact(s: &T) -> String;
}

const REDACTED_VALUE: &str = "<REDACTED>";

#[derive(Clone)]
pub struct PlainRedactor {}

impl<T> RedactionFunction<T> for PlainRedactor {
    fn redact(_: &T) -> String {
        REDACTED_VALUE.to_string()
    }
}

/// Replaces the value with a fixed run of asterisks, so the output gives away neither
/// the value nor its length.
#[derive(Clone)]
pub struct AsteriskRedactor {}

pub const ASTERISK_MASK: &str = "*************";

impl<T> RedactionFunction<T> for AsteriskRedactor {
    fn redact(_: &T) -> String {
        ASTERISK_MASK.to_string()
    }
}

#[derive(Clone)]
pub struct CliSecret<T, R>
where
    R: RedactionFunction<T>,
{
    value: T,
    redaction_function: PhantomData<R>,
}

impl<T, R> CliSecret<T, R>
where
    R: RedactionFunction<T>,
{
    pub fn new(value: T) -> Self {
        Self {
            value,
            redaction_function: PhantomData,
        }
    }

    /// The value as it should appear in logs
    pub fn redacted(&self) -> String {
        R::redact(&self.value)
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, R> Deref for CliSecret<T, R>
where
    R: RedactionFunction<T>,
{
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<T, R> fmt::Debug for CliSecret<T, R>
where
    T: Display,
    R: RedactionFunction<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = R::redact(&self.value);
        f.write_str(&text)
    }
}

impl<T, R> FromStr for CliSecret<T, R>
where
    T: FromStr,
    R: RedactionFunction<T>,
{
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = T::from_str(s)?;
        Ok(CliSecret {
            value: t,
            redaction_function: PhantomData,
        })
    }
}
