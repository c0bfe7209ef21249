use std::collections::HashMap;

/// Running sum and count of star values for one movie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StarTally {
    pub sum: i64,
    pub count: i64,
}

impl StarTally {
    pub fn add(&mut self, value: i32) {
        self.sum += i64::from(value);
        self.count += 1;
    }

    /// Average star rounded half up, `None` when nothing was rated.
    #[must_use]
    pub fn middle_star(&self) -> Option<i32> {
        if self.count == 0 {
            return None;
        }
        // round(sum / count) with halves going up, kept in integers.
        let rounded = (2 * self.sum + self.count).div_euclid(2 * self.count);
        i32::try_from(rounded).ok()
    }
}

impl FromIterator<i32> for StarTally {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut tally = Self::default();
        for value in iter {
            tally.add(value);
        }
        tally
    }
}

/// Average of the given star values, rounded half up.
#[must_use]
pub fn middle_star(values: &[i32]) -> Option<i32> {
    values.iter().copied().collect::<StarTally>().middle_star()
}

/// Groups `(movie_id, star_value)` rows into one tally per movie.
#[must_use]
pub fn tally_by_movie(rows: impl IntoIterator<Item = (i32, i32)>) -> HashMap<i32, StarTally> {
    let mut tallies: HashMap<i32, StarTally> = HashMap::new();
    for (movie_id, value) in rows {
        tallies.entry(movie_id).or_default().add(value);
    }
    tallies
}
