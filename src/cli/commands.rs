use crate::aggregator::PostFilter;
use crate::app::{AppContext, Result};
use crate::domain::{CommentCard, PostCard, ReplyCard};

pub async fn show_feed(ctx: &AppContext, filter: PostFilter, pages: usize, json: bool) -> Result<()> {
    let mut session = ctx.feed_session(filter);

    for _ in 0..pages {
        let page = session.next_page().await?;
        if !json {
            for card in page {
                println!("{}", format_post_card(card));
            }
        }
        if session.is_exhausted() {
            if !json {
                println!("No more posts");
            }
            break;
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(session.cards())?);
    } else if session.cards().is_empty() {
        println!("No posts");
    }

    Ok(())
}

pub async fn show_post(ctx: &AppContext, post_id: i64, json: bool) -> Result<()> {
    let detail = ctx.aggregator.post_detail(post_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    println!("{}", format_post_card(&detail.post));
    println!("{}\n", detail.post.body.content);
    if detail.comments.is_fallback() {
        println!("Comments failed to load");
    } else {
        print_comments(&detail.comments);
    }

    Ok(())
}

pub async fn show_comments(ctx: &AppContext, post_id: i64, json: bool) -> Result<()> {
    let comments = ctx.aggregator.assemble_comments(post_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&comments)?);
    } else {
        print_comments(&comments);
    }

    Ok(())
}

fn print_comments(comments: &[CommentCard]) {
    if comments.is_empty() {
        println!("No comments");
        return;
    }

    for card in comments {
        println!("{}", format_comment(card));
        for reply in &card.replies {
            println!("    {}", format_reply(reply));
        }
    }
}

fn format_post_card(card: &PostCard) -> String {
    let images = if card.has_image() {
        format!(" [{} images]", card.images().len())
    } else {
        String::new()
    };

    format!(
        "#{} {} · {} · {}{}\n  {}",
        card.id(),
        card.post.created_at.format("%Y-%m-%d %H:%M"),
        card.author.name,
        card.category.name,
        images,
        card.post.excerpt
    )
}

fn format_comment(card: &CommentCard) -> String {
    format!(
        "{} ({}): {}",
        card.author.name,
        card.comment.created_at.format("%Y-%m-%d %H:%M"),
        card.comment.text
    )
}

fn format_reply(card: &ReplyCard) -> String {
    format!("↳ {}: {}", card.author.name, card.comment.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Comment, PostMeta, Resolved, User};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_degraded_post_card() {
        let mut post = PostMeta::new(3, 8, 2, Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap());
        post.excerpt = "hello".into();
        post.images = vec!["a.png".into(), "b.png".into()];

        let text = format_post_card(&PostCard::degraded(post));

        assert_eq!(
            text,
            "#3 2024-05-01 09:30 · failed to load · uncategorized [2 images]\n  hello"
        );
    }

    #[test]
    fn test_format_reply() {
        let mut comment = Comment::new(4, 3, 8, Utc::now());
        comment.parent_id = 1;
        comment.text = "agreed".into();
        let reply = ReplyCard::new(comment, Resolved::Fallback(User::unknown(8)));

        assert_eq!(format_reply(&reply), "↳ unknown user: agreed");
    }
}
