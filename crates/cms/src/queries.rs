//! GROQ queries run by the site.
//!
//! Both page queries share one projection so list and detail views
//! receive identically shaped records. Image fields dereference their
//! asset to expose the CDN `url` next to the reference and alt text.

/// Query parameter carrying the requested slug.
pub const SLUG_PARAM: &str = "slug";

macro_rules! image_projection {
    () => {
        r#"{ asset, alt, "url": asset->url }"#
    };
}

macro_rules! project_projection {
    () => {
        concat!(
            "{ _id, title, client, category, slug, vimeoUrl, ",
            "thumbnail ",
            image_projection!(),
            ", overview, credits, ",
            "topStills[] ",
            image_projection!(),
            ", bottomStills[] ",
            image_projection!(),
            ", featured, orderRank }"
        )
    };
}

/// Field projection shared by the page queries.
pub const PROJECT_PROJECTION: &str = project_projection!();

/// Every project, ascending by rank.
pub const PROJECTS_QUERY: &str = concat!(
    r#"*[_type == "project"] | order(orderRank asc) "#,
    project_projection!()
);

/// The first project whose `slug.current` equals `$slug`.
pub const PROJECT_BY_SLUG_QUERY: &str = concat!(
    r#"*[_type == "project" && slug.current == $slug][0] "#,
    project_projection!()
);

/// Cheapest query that proves the dataset is reachable.
pub const CONNECTIVITY_QUERY: &str = r#"*[_type == "project"][0] { _id, title }"#;
