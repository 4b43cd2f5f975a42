//! Compiled-in favorites shown next to the search results.

use crate::movie::Movie;

#[allow(clippy::too_many_arguments)]
fn favorite(
    id: i64,
    title: &str,
    language: &str,
    overview: &str,
    popularity: f64,
    poster_path: &str,
    release_date: &str,
    vote_average: f64,
    vote_count: u64,
) -> Movie {
    Movie {
        id,
        title: Some(title.to_string()),
        original_language: Some(language.to_string()),
        overview: Some(overview.to_string()),
        popularity,
        poster_path: Some(poster_path.to_string()),
        release_date: Some(release_date.to_string()),
        vote_average,
        vote_count,
    }
}

/// The fixed favorites list, in display order
pub fn favorite_movies() -> Vec<Movie> {
    vec![
        favorite(
            682507,
            "Where the Crawdads Sing",
            "en",
            "Abandoned by her family, Kya raises herself all alone in the marshes outside of her small town. \
             When her former boyfriend is found dead, Kya is instantly branded by the local townspeople and law enforcement as the prime suspect for his murder.",
            51.212,
            "/6h5OCqRnWH7Dcm4IeP4JypBdtuI.jpg",
            "2022-07-14",
            7.545,
            1635,
        ),
        favorite(
            321612,
            "Beauty and the Beast",
            "en",
            "A live-action adaptation of Disney's version of the classic tale of a cursed prince and a beautiful young woman who helps him break the spell.",
            102.889,
            "/hKegSKIDep2ewJWPUQD7u0KqFIp.jpg",
            "2017-03-16",
            6.968,
            15248,
        ),
        favorite(
            38757,
            "Tangled",
            "en",
            "When the kingdom's most wanted-and most charming-bandit Flynn Rider hides out in a mysterious tower, he's taken hostage by Rapunzel, \
             a beautiful and feisty tower-bound teen with 70 feet of magical, golden hair. Flynn's curious captor, who's looking for her ticket out of the tower \
             where she's been locked away for years, strikes a deal with the handsome thief and the unlikely duo sets off on an action-packed escapade, \
             complete with a super-cop horse, an over-protective chameleon and a gruff gang of pub thugs.",
            130.603,
            "/ym7Kst6a4uodryxqbGOxmewF235.jpg",
            "2010-11-24",
            7.607,
            11171,
        ),
        favorite(
            9602,
            "Coming to America",
            "en",
            "An African prince decides it's time for him to find a princess... and his mission leads him and his most loyal friend to Queens, New York. \
             In disguise as an impoverished immigrant, the pampered prince quickly finds himself a new job, new friends, new digs, new enemies and lots of trouble.",
            62.817,
            "/djRAvxyvvN2yqlJKDbT3uy4vOBw.jpg",
            "1988-06-29",
            6.882,
            4218,
        ),
        favorite(
            637920,
            "Miracle in Cell No. 7",
            "tr",
            "Separated from his daughter, a father with an intellectual disability must prove his innocence when he is jailed for the death of a commander's child.",
            58.285,
            "/bOth4QmNyEkalwahfPCfiXjNh1r.jpg",
            "2019-10-10",
            8.266,
            4330,
        ),
    ]
}
