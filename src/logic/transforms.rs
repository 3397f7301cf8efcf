// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Pure list transforms that derive the visible projection of the people list.
//!
//! Every transform borrows its input and returns a fresh `Vec`, so the canonical
//! list is never reordered or truncated in place.

use rand::Rng;

use crate::models::Person;

/// Return the people in a uniformly random order using the thread-local RNG.
pub fn shuffle(list: &[Person]) -> Vec<Person> {
    shuffle_with(list, &mut rand::rng())
}

/// Fisher–Yates shuffle of a copy of `list` driven by `rng`.
///
/// Walks from the last index down to 1, swapping each slot with a uniformly
/// chosen slot in `0..=i`. Every permutation is equally likely for a uniform `rng`.
pub fn shuffle_with<R: Rng>(list: &[Person], rng: &mut R) -> Vec<Person> {
    let mut result = list.to_vec();
    for i in (1..result.len()).rev() {
        let j = rng.random_range(0..=i);
        result.swap(i, j);
    }
    result
}

/// Keep the people whose name contains `query`, ignoring case.
///
/// Matching is a plain substring test on the full name (`"vij"` matches
/// `"Viju Legard"`). An empty query keeps everyone. Relative order is preserved.
pub fn filter_by_name(query: &str, list: &[Person]) -> Vec<Person> {
    let needle = query.to_lowercase();
    list.iter()
        .filter(|person| person.name().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Build a sorter that orders a list ascending by the string `key` extracts.
///
/// The sort is stable: people with equal keys keep their input order.
///
/// # Examples
///
/// ```ignore
/// let by_last = sort_by_key(Person::last_name);
/// let sorted = by_last(&people);
/// ```
pub fn sort_by_key<F>(key: F) -> impl Fn(&[Person]) -> Vec<Person>
where
    F: Fn(&Person) -> &str,
{
    move |list: &[Person]| {
        let mut result = list.to_vec();
        result.sort_by(|a, b| key(a).cmp(key(b)));
        result
    }
}

/// "Sort (First Name)": sorts on the full `name`, i.e. a full-name lexicographic order.
///
/// Labelled by first name to match the button; people sharing a first name are
/// therefore ordered by the remainder of their full name.
pub fn sort_by_first_name(list: &[Person]) -> Vec<Person> {
    sort_by_key(Person::name)(list)
}

/// "Sort (Last Name)": sorts on the `last_name` captured at load time.
pub fn sort_by_last_name(list: &[Person]) -> Vec<Person> {
    sort_by_key(Person::last_name)(list)
}
