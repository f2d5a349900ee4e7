//! SQL text of the three reports.
//!
//! A view is a `log` row whose path is `/article/<slug>`. An error is a
//! `log` row whose status text does not start with a 2xx code.
//! `LIMIT NULL` is unlimited in PostgreSQL, so an absent limit is bound as NULL.

/// Articles by descending view count. `$1`: row limit.
pub const TOP_ARTICLES_SQL: &str = "\
SELECT articles.id, articles.title, article_views.views
  FROM (
    SELECT path, count(*) AS views
      FROM log
      WHERE path LIKE '/article/%'
      GROUP BY path
  ) AS article_views
  INNER JOIN articles
    ON article_views.path = '/article/' || articles.slug
  ORDER BY article_views.views DESC
  LIMIT $1";

/// Authors by descending summed article views. `$1`: row limit.
pub const TOP_AUTHORS_SQL: &str = "\
SELECT authors.id, authors.name, sum(article_views.views)::bigint AS views
  FROM (
    SELECT path, count(*) AS views
      FROM log
      WHERE path LIKE '/article/%'
      GROUP BY path
  ) AS article_views
  INNER JOIN articles
    ON article_views.path = '/article/' || articles.slug
  INNER JOIN authors
    ON articles.author = authors.id
  GROUP BY authors.id, authors.name
  ORDER BY sum(article_views.views) DESC
  LIMIT $1";

/// Days whose error percentage exceeds `$1`, newest first. `$2`: row limit.
pub const ERROR_DAYS_SQL: &str = "\
SELECT log_day, errors, total
  FROM (
    SELECT log.time::date AS log_day,
           sum(CASE WHEN log.status NOT LIKE '2%' THEN 1 ELSE 0 END)::bigint AS errors,
           count(*) AS total
      FROM log
      GROUP BY log.time::date
  ) AS daily
  WHERE 100 * errors > $1::double precision * total
  ORDER BY log_day DESC
  LIMIT $2";

/// All report queries, in execution order.
pub const ALL: [(&str, &str); 3] = [
    ("top articles", TOP_ARTICLES_SQL),
    ("top authors", TOP_AUTHORS_SQL),
    ("error days", ERROR_DAYS_SQL),
];
