//! Server-rendered HTML pages.
//!
//! Plain functions returning [`Html<String>`] built with `format!` over
//! raw-string templates and one shared layout with embedded CSS. All
//! user-supplied text passes through [`escape`] before interpolation.

use axum::http::StatusCode;
use axum::response::Html;
use cinelog_core::types::Timestamp;
use cinelog_db::models::comment::{Comment, CommentWithAuthor};
use cinelog_db::models::review::{Review, ReviewWithAuthor};

use crate::forms::{ReviewForm, SignupForm, RANK_MAX, RANK_MIN};

/// Escape text for safe interpolation into HTML bodies and attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn fmt_ts(ts: &Timestamp) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// Shared page chrome: header with navigation, embedded CSS, footer.
///
/// `user` is the signed-in username, if any; it drives which navigation
/// links are shown.
fn layout(title: &str, user: Option<&str>, body: &str) -> Html<String> {
    let nav = match user {
        Some(username) => format!(
            r#"<span class="nav-user">Signed in as <strong>{}</strong></span>
        <a href="/review/create">New review</a>
        <form method="post" action="/logout" class="inline-form">
            <button type="submit" class="link-button">Log out</button>
        </form>"#,
            escape(username)
        ),
        None => r#"<a href="/login">Log in</a>
        <a href="/signup">Sign up</a>"#
            .to_string(),
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - cinelog</title>
    <style>
        body {{
            font-family: system-ui, -apple-system, sans-serif;
            max-width: 800px;
            margin: 40px auto;
            padding: 20px;
            line-height: 1.6;
            color: #222;
        }}
        h1 {{
            border-bottom: 2px solid #8b0000;
            padding-bottom: 10px;
        }}
        nav {{
            display: flex;
            gap: 14px;
            align-items: center;
            margin-bottom: 24px;
        }}
        nav a {{ color: #8b0000; text-decoration: none; }}
        nav a:hover {{ text-decoration: underline; }}
        .nav-user {{ color: #555; }}
        .inline-form {{ display: inline; margin: 0; }}
        .link-button {{
            background: none;
            border: none;
            padding: 0;
            color: #8b0000;
            cursor: pointer;
            font: inherit;
        }}
        .link-button:hover {{ text-decoration: underline; }}
        .review {{
            border: 1px solid #ddd;
            border-radius: 4px;
            padding: 12px 16px;
            margin-bottom: 12px;
        }}
        .review h2 {{ margin: 0 0 4px; font-size: 1.1em; }}
        .review h2 a {{ color: #222; text-decoration: none; }}
        .review h2 a:hover {{ color: #8b0000; }}
        .meta {{ color: #777; font-size: 0.85em; }}
        .rank {{ color: #8b0000; font-weight: bold; }}
        .errors {{
            background: #fdecea;
            border: 1px solid #e0b4b4;
            border-radius: 4px;
            padding: 8px 16px 8px 32px;
            color: #8b0000;
        }}
        form.page-form label {{ display: block; margin-top: 12px; font-weight: bold; }}
        form.page-form input, form.page-form textarea {{
            width: 100%;
            padding: 6px;
            box-sizing: border-box;
            font: inherit;
        }}
        form.page-form textarea {{ min-height: 120px; }}
        form.page-form button[type=submit] {{
            margin-top: 16px;
            padding: 8px 20px;
            background: #8b0000;
            color: white;
            border: none;
            border-radius: 4px;
            cursor: pointer;
        }}
        .comment {{
            border-top: 1px solid #eee;
            padding: 8px 0;
        }}
        table {{ border-collapse: collapse; width: 100%; }}
        th, td {{ border: 1px solid #ddd; padding: 6px 10px; text-align: left; }}
        th {{ background: #f6f6f6; }}
    </style>
</head>
<body>
    <nav>
        <a href="/">cinelog</a>
        {nav}
    </nav>
    {body}
    <footer><p class="meta">cinelog v{version}</p></footer>
</body>
</html>
"#,
        title = escape(title),
        nav = nav,
        body = body,
        version = env!("CARGO_PKG_VERSION"),
    ))
}

/// Render a `(field, message)` error list, or nothing when there are none.
fn error_list(errors: &[(String, String)]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|(field, message)| {
            format!(
                "<li><strong>{}</strong>: {}</li>\n",
                escape(field),
                escape(message)
            )
        })
        .collect();
    format!("<ul class=\"errors\">\n{items}</ul>\n")
}

/// GET `/` -- all reviews, most recent first.
pub fn index_page(user: Option<&str>, reviews: &[ReviewWithAuthor]) -> Html<String> {
    let listing = if reviews.is_empty() {
        "<p>No reviews yet. Be the first to write one.</p>".to_string()
    } else {
        reviews
            .iter()
            .map(|review| {
                format!(
                    r#"<article class="review">
    <h2><a href="/review/{id}">{title}</a></h2>
    <p class="meta">{movie} &middot; <span class="rank">{rank}/{rank_max}</span>
       &middot; by {author} &middot; {created}</p>
</article>
"#,
                    id = review.id,
                    title = escape(&review.title),
                    movie = escape(&review.movie_title),
                    rank = review.rank,
                    rank_max = RANK_MAX,
                    author = escape(&review.author),
                    created = fmt_ts(&review.created_at),
                )
            })
            .collect()
    };

    layout("Reviews", user, &format!("<h1>Movie reviews</h1>\n{listing}"))
}

/// GET `/signup` -- registration form, re-rendered with errors on invalid POST.
pub fn signup_page(form: &SignupForm, errors: &[(String, String)]) -> Html<String> {
    let body = format!(
        r#"<h1>Sign up</h1>
{errors}
<form method="post" action="/signup" class="page-form">
    <label for="username">Username</label>
    <input type="text" id="username" name="username" value="{username}" required>
    <label for="email">Email (optional)</label>
    <input type="text" id="email" name="email" value="{email}">
    <label for="password">Password</label>
    <input type="password" id="password" name="password">
    <label for="password_confirm">Confirm password</label>
    <input type="password" id="password_confirm" name="password_confirm">
    <button type="submit">Create account</button>
</form>
"#,
        errors = error_list(errors),
        username = escape(&form.username),
        email = escape(&form.email),
    );
    layout("Sign up", None, &body)
}

/// GET `/login` -- login form. `next` is carried through the form action so
/// a successful POST can return the visitor to where they came from.
pub fn login_page(username: &str, next: Option<&str>, errors: &[(String, String)]) -> Html<String> {
    let action = match next {
        Some(next) => format!("/login?next={}", urlencoding::encode(next)),
        None => "/login".to_string(),
    };
    let body = format!(
        r#"<h1>Log in</h1>
{errors}
<form method="post" action="{action}" class="page-form">
    <label for="username">Username</label>
    <input type="text" id="username" name="username" value="{username}" required>
    <label for="password">Password</label>
    <input type="password" id="password" name="password">
    <button type="submit">Log in</button>
</form>
<p>No account? <a href="/signup">Sign up</a>.</p>
"#,
        errors = error_list(errors),
        action = escape(&action),
        username = escape(username),
    );
    layout("Log in", None, &body)
}

/// GET `/review/create` -- review form, re-rendered with errors on invalid POST.
pub fn review_form_page(
    user: &str,
    form: &ReviewForm,
    errors: &[(String, String)],
) -> Html<String> {
    let body = format!(
        r#"<h1>Write a review</h1>
{errors}
<form method="post" action="/review/create" class="page-form">
    <label for="title">Title</label>
    <input type="text" id="title" name="title" value="{title}" required>
    <label for="movie_title">Movie title</label>
    <input type="text" id="movie_title" name="movie_title" value="{movie_title}" required>
    <label for="rank">Rank ({rank_min}-{rank_max})</label>
    <input type="number" id="rank" name="rank" min="{rank_min}" max="{rank_max}" value="{rank}">
    <label for="content">Content</label>
    <textarea id="content" name="content">{content}</textarea>
    <button type="submit">Publish</button>
</form>
"#,
        errors = error_list(errors),
        title = escape(&form.title),
        movie_title = escape(&form.movie_title),
        rank = escape(&form.rank),
        rank_min = RANK_MIN,
        rank_max = RANK_MAX,
        content = escape(&form.content),
    );
    layout("Write a review", Some(user), &body)
}

/// GET `/review/{id}` -- review detail with comments and a comment form.
///
/// `comment_content` and `comment_errors` carry an invalid comment POST back
/// into the re-rendered form.
pub fn detail_page(
    user: Option<&str>,
    review: &ReviewWithAuthor,
    comments: &[CommentWithAuthor],
    comment_content: &str,
    comment_errors: &[(String, String)],
) -> Html<String> {
    let comment_items: String = comments
        .iter()
        .map(|comment| {
            format!(
                r#"<div class="comment">
    <p>{content}</p>
    <p class="meta">{author} &middot; {created}</p>
</div>
"#,
                content = escape(&comment.content),
                author = escape(&comment.author),
                created = fmt_ts(&comment.created_at),
            )
        })
        .collect();

    let comment_form = if user.is_some() {
        format!(
            r#"{errors}
<form method="post" action="/review/{id}/comment" class="page-form">
    <label for="content">Add a comment</label>
    <textarea id="content" name="content">{content}</textarea>
    <button type="submit">Comment</button>
</form>
"#,
            errors = error_list(comment_errors),
            id = review.id,
            content = escape(comment_content),
        )
    } else {
        r#"<p><a href="/login">Log in</a> to comment.</p>"#.to_string()
    };

    let body = format!(
        r#"<h1>{title}</h1>
<p class="meta">{movie} &middot; <span class="rank">{rank}/{rank_max}</span>
   &middot; by {author} &middot; {created}</p>
<p>{content}</p>
<h2>Comments ({count})</h2>
{comments}
{comment_form}
"#,
        title = escape(&review.title),
        movie = escape(&review.movie_title),
        rank = review.rank,
        rank_max = RANK_MAX,
        author = escape(&review.author),
        created = fmt_ts(&review.created_at),
        content = escape(&review.content),
        count = comments.len(),
        comments = comment_items,
        comment_form = comment_form,
    );
    layout(&review.title, user, &body)
}

/// GET `/admin/reviews` -- operator table of all review rows.
pub fn admin_reviews_page(user: &str, reviews: &[Review]) -> Html<String> {
    let rows: String = reviews
        .iter()
        .map(|r| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
                 <td>{}</td><td>{}</td><td>{}</td></tr>\n",
                r.id,
                escape(&r.title),
                escape(&r.movie_title),
                r.rank,
                escape(&r.content),
                fmt_ts(&r.created_at),
                fmt_ts(&r.updated_at),
                r.user_id,
            )
        })
        .collect();

    let body = format!(
        r#"<h1>Admin: reviews</h1>
<p><a href="/admin/comments">comments</a></p>
<table>
<tr><th>id</th><th>title</th><th>movie_title</th><th>rank</th><th>content</th>
    <th>created_at</th><th>updated_at</th><th>user_id</th></tr>
{rows}</table>
"#
    );
    layout("Admin: reviews", Some(user), &body)
}

/// GET `/admin/comments` -- operator table of all comment rows.
pub fn admin_comments_page(user: &str, comments: &[Comment]) -> Html<String> {
    let rows: String = comments
        .iter()
        .map(|c| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                c.id,
                escape(&c.content),
                c.review_id,
                c.user_id,
            )
        })
        .collect();

    let body = format!(
        r#"<h1>Admin: comments</h1>
<p><a href="/admin/reviews">reviews</a></p>
<table>
<tr><th>id</th><th>content</th><th>review_id</th><th>user_id</th></tr>
{rows}</table>
"#
    );
    layout("Admin: comments", Some(user), &body)
}

/// 404 page for unknown reviews and unmatched routes.
pub fn not_found_page() -> Html<String> {
    layout(
        "Not found",
        None,
        r#"<h1>Not found</h1>
<p>The page you requested does not exist. <a href="/">Back to reviews</a>.</p>"#,
    )
}

/// 403 page for non-admin access to operator pages.
pub fn forbidden_page() -> Html<String> {
    layout(
        "Forbidden",
        None,
        r#"<h1>Forbidden</h1>
<p>You do not have access to this page. <a href="/">Back to reviews</a>.</p>"#,
    )
}

/// Generic error page for the remaining [`StatusCode`]s.
pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let body = format!(
        "<h1>{status}</h1>\n<p>{message}</p>\n<p><a href=\"/\">Back to reviews</a>.</p>",
        status = status,
        message = escape(message),
    );
    layout("Error", None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape("a & b's"), "a &amp; b&#39;s");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn index_escapes_user_content() {
        let review = ReviewWithAuthor {
            id: 1,
            user_id: 1,
            title: "<b>bold</b>".to_string(),
            movie_title: "Alien".to_string(),
            rank: 8,
            content: "ok".to_string(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
            author: "eve".to_string(),
        };
        let Html(html) = index_page(None, &[review]);
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!html.contains("<b>bold</b>"));
    }

    #[test]
    fn login_page_carries_next_target() {
        let Html(html) = login_page("", Some("/review/create"), &[]);
        assert!(html.contains("/login?next=%2Freview%2Fcreate"));
    }
}
