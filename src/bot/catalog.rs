//! Fixed song suggestions for the `recommend` and `mood` commands.

pub const GENRES: &[(&str, &[&str])] = &[
    (
        "pop",
        &[
            "Shape of You - Ed Sheeran",
            "Blinding Lights - The Weeknd",
            "Watermelon Sugar - Harry Styles",
            "Levitating - Dua Lipa",
            "Good 4 U - Olivia Rodrigo",
        ],
    ),
    (
        "rock",
        &[
            "Bohemian Rhapsody - Queen",
            "Sweet Child O Mine - Guns N Roses",
            "Hotel California - Eagles",
            "Stairway to Heaven - Led Zeppelin",
            "Smells Like Teen Spirit - Nirvana",
        ],
    ),
    (
        "hip-hop",
        &[
            "God's Plan - Drake",
            "HUMBLE. - Kendrick Lamar",
            "Sicko Mode - Travis Scott",
            "Old Town Road - Lil Nas X",
            "Rockstar - Post Malone",
        ],
    ),
    (
        "r&b",
        &[
            "Blinding Lights - The Weeknd",
            "Peaches - Justin Bieber",
            "Levitating - Dua Lipa",
            "Good Days - SZA",
            "Leave The Door Open - Bruno Mars",
        ],
    ),
    (
        "country",
        &[
            "The Good Ones - Gabby Barrett",
            "More Than My Hometown - Morgan Wallen",
            "Heartbreak Hotel - Chris Young",
            "Life Changes - Thomas Rhett",
            "Star Spangled Banner - Chris Stapleton",
        ],
    ),
];

pub const MOODS: &[(&str, &[&str])] = &[
    (
        "happy",
        &[
            "Happy - Pharrell Williams",
            "Good as Hell - Lizzo",
            "Shake It Off - Taylor Swift",
            "Uptown Funk - Bruno Mars",
            "Can't Stop the Feeling - Justin Timberlake",
        ],
    ),
    (
        "sad",
        &[
            "Someone Like You - Adele",
            "Hurt - Johnny Cash",
            "Mad World - Gary Jules",
            "Black - Pearl Jam",
            "Tears in Heaven - Eric Clapton",
        ],
    ),
    (
        "energetic",
        &[
            "Thunder - Imagine Dragons",
            "Pump It - Black Eyed Peas",
            "Eye of the Tiger - Survivor",
            "Don't Stop Me Now - Queen",
            "Confident - Demi Lovato",
        ],
    ),
    (
        "chill",
        &[
            "Stay - Rihanna",
            "Summertime - DJ Jazzy Jeff",
            "Sunday Morning - Maroon 5",
            "Come Away With Me - Norah Jones",
            "Breathe Me - Sia",
        ],
    ),
    (
        "romantic",
        &[
            "Perfect - Ed Sheeran",
            "All of Me - John Legend",
            "Thinking Out Loud - Ed Sheeran",
            "A Thousand Years - Christina Perri",
            "Make You Feel My Love - Adele",
        ],
    ),
];

pub fn genre(name: &str) -> Option<&'static [&'static str]> {
    let name = name.to_lowercase();
    GENRES
        .iter()
        .find(|(genre, _)| *genre == name)
        .map(|(_, songs)| *songs)
}

/// First mood whose name contains the input or is contained in it.
pub fn mood(input: &str) -> Option<(&'static str, &'static [&'static str])> {
    let input = input.to_lowercase();
    MOODS
        .iter()
        .find(|(mood, _)| mood.contains(input.as_str()) || input.contains(mood))
        .copied()
}

pub fn names(table: &[(&'static str, &'static [&'static str])]) -> String {
    table
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_lookup_is_case_insensitive() {
        assert_eq!(genre("ROCK").unwrap()[0], "Bohemian Rhapsody - Queen");
        assert!(genre("polka").is_none());
    }

    #[test]
    fn test_mood_matches_substrings_both_ways() {
        assert_eq!(mood("very happy today").unwrap().0, "happy");
        assert_eq!(mood("chi").unwrap().0, "chill");
        assert!(mood("angry").is_none());
    }

    #[test]
    fn test_names_lists_table_order() {
        assert_eq!(names(MOODS), "happy, sad, energetic, chill, romantic");
    }
}
