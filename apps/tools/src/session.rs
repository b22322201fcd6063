//! Line-oriented storefront session. Commands mutate the store through its
//! operations only; the pending checkout clear fires from a timer even while
//! the session is waiting for input.

use std::time::Instant;

use anyhow::{Context, Result};
use shared::{
    domain::{Lesson, LessonId, SortField, SortOrder},
    protocol::CheckoutOutcome,
};
use storefront::{
    display::{format_price, icon_glyph},
    Storefront,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const HELP: &str = "\
commands:
  list                      show lessons (current search and sort)
  search [term]             filter lessons; no term clears the filter
  sort <field> [asc|desc]   field: subject, location, price, spaces
  add <lesson id>           reserve one space
  inc <line> | dec <line>   change a cart line quantity (lines start at 1)
  remove <line>             drop a cart line and release its spaces
  cart                      show the cart
  home                      back to the lesson list
  name <full name>          set checkout name
  phone <digits>            set checkout phone number
  checkout                  validate and place the order
  cancel                    cancel the pending cart clear
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    List,
    Search(String),
    Sort(SortField, SortOrder),
    Add(LessonId),
    Increase(usize),
    Decrease(usize),
    Remove(usize),
    Cart,
    Home,
    Name(String),
    Phone(String),
    Checkout,
    Cancel,
    Help,
    Quit,
}

fn line_index(arg: &str) -> Result<usize, String> {
    match arg.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("'{arg}' is not a cart line number")),
    }
}

pub fn parse_command(line: &str) -> Result<SessionCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "list" | "ls" => Ok(SessionCommand::List),
        "search" => Ok(SessionCommand::Search(rest.to_string())),
        "sort" => {
            let mut parts = rest.split_whitespace();
            let field = parts
                .next()
                .ok_or_else(|| "usage: sort <field> [asc|desc]".to_string())?
                .parse::<SortField>()?;
            let order = match parts.next() {
                Some(order) => order.parse::<SortOrder>()?,
                None => SortOrder::Asc,
            };
            Ok(SessionCommand::Sort(field, order))
        }
        "add" => rest
            .parse::<u32>()
            .map(|id| SessionCommand::Add(LessonId(id)))
            .map_err(|_| format!("'{rest}' is not a lesson id")),
        "inc" => line_index(rest).map(SessionCommand::Increase),
        "dec" => line_index(rest).map(SessionCommand::Decrease),
        "remove" | "rm" => line_index(rest).map(SessionCommand::Remove),
        "cart" => Ok(SessionCommand::Cart),
        "home" => Ok(SessionCommand::Home),
        "name" => Ok(SessionCommand::Name(rest.to_string())),
        "phone" => Ok(SessionCommand::Phone(rest.to_string())),
        "checkout" => Ok(SessionCommand::Checkout),
        "cancel" => Ok(SessionCommand::Cancel),
        "help" | "?" => Ok(SessionCommand::Help),
        "quit" | "exit" => Ok(SessionCommand::Quit),
        "" => Err("empty command".to_string()),
        other => Err(format!("unknown command '{other}' (try 'help')")),
    }
}

pub fn render_lessons(lessons: &[&Lesson]) -> String {
    if lessons.is_empty() {
        return "no lessons match".to_string();
    }
    lessons
        .iter()
        .map(|lesson| {
            let availability = if lesson.spaces == 0 {
                "sold out".to_string()
            } else {
                format!("{} spaces", lesson.spaces)
            };
            format!(
                "[{:>2}] {} {:<18} {:<14} {:>6}  {}",
                lesson.id,
                icon_glyph(&lesson.icon),
                lesson.subject,
                lesson.location,
                format_price(lesson.price),
                availability
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_cart(store: &Storefront) -> String {
    if store.cart_lines().is_empty() {
        return "cart is empty".to_string();
    }
    let mut out: Vec<String> = store
        .cart_lines()
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            format!(
                "{:>2}. {:<18} {:<14} {} x{} = {}",
                idx + 1,
                line.subject,
                line.location,
                format_price(line.price),
                line.quantity,
                format_price(line.line_total())
            )
        })
        .collect();
    out.push(format!(
        "{} item(s), total {}",
        store.cart_item_count(),
        format_price(store.cart_total())
    ));
    out.join("\n")
}

pub enum Flow {
    Continue,
    Quit,
}

/// Applies one command and returns the text to show.
pub fn apply_command(
    store: &mut Storefront,
    command: SessionCommand,
    now: Instant,
) -> (Flow, String) {
    let reply = match command {
        SessionCommand::List => {
            store.go_home();
            render_lessons(&store.sorted_and_filtered_lessons())
        }
        SessionCommand::Search(term) => {
            store.set_search_term(term);
            render_lessons(&store.sorted_and_filtered_lessons())
        }
        SessionCommand::Sort(field, order) => {
            store.set_sort(field, order);
            render_lessons(&store.sorted_and_filtered_lessons())
        }
        SessionCommand::Add(lesson_id) => match store.add_to_cart(lesson_id) {
            Ok(()) => format!("added lesson {lesson_id}; {} item(s) in cart", store.cart_item_count()),
            Err(err) => format!("not added: {err}"),
        },
        SessionCommand::Increase(index) => match store.increase_quantity(index) {
            Ok(()) => render_cart(store),
            Err(err) => format!("unchanged: {err}"),
        },
        SessionCommand::Decrease(index) => match store.decrease_quantity(index) {
            Ok(()) => render_cart(store),
            Err(err) => format!("unchanged: {err}"),
        },
        SessionCommand::Remove(index) => match store.remove_from_cart(index) {
            Ok(line) => format!("removed {} (x{})\n{}", line.subject, line.quantity, render_cart(store)),
            Err(err) => format!("unchanged: {err}"),
        },
        SessionCommand::Cart => {
            store.show_cart();
            render_cart(store)
        }
        SessionCommand::Home => {
            store.go_home();
            "back to lessons".to_string()
        }
        SessionCommand::Name(name) => {
            store.set_name(name);
            field_status(store)
        }
        SessionCommand::Phone(phone) => {
            store.set_phone(phone);
            field_status(store)
        }
        SessionCommand::Checkout => match store.checkout_at(now) {
            CheckoutOutcome::Confirmed(order) => format!(
                "order confirmed for {}: {} item(s), {}; cart clears in {} ms",
                order.name,
                order.item_count,
                format_price(order.total),
                store.clear_delay().as_millis()
            ),
            CheckoutOutcome::Rejected(errors) => [errors.name_message(), errors.phone_message()]
                .into_iter()
                .filter(|msg| !msg.is_empty())
                .collect::<Vec<_>>()
                .join("\n"),
        },
        SessionCommand::Cancel => {
            if store.cancel_pending_clear() {
                "pending clear cancelled".to_string()
            } else {
                "nothing pending".to_string()
            }
        }
        SessionCommand::Help => HELP.to_string(),
        SessionCommand::Quit => return (Flow::Quit, "bye".to_string()),
    };
    (Flow::Continue, reply)
}

fn field_status(store: &Storefront) -> String {
    let errors = store.form().errors();
    let mut parts = vec![if store.is_form_valid() {
        "details valid".to_string()
    } else {
        "details incomplete".to_string()
    }];
    parts.extend(
        [errors.name_message(), errors.phone_message()]
            .into_iter()
            .filter(|msg| !msg.is_empty())
            .map(str::to_string),
    );
    parts.join("\n")
}

pub async fn run_session<R, W>(store: &mut Storefront, input: R, output: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    loop {
        let wait = store.time_until_clear(Instant::now());
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read session input")? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let reply = match parse_command(&line) {
                    Ok(command) => {
                        tracing::debug!(?command, "session command");
                        let (flow, reply) = apply_command(store, command, Instant::now());
                        if let Flow::Quit = flow {
                            output.write_all(format!("{reply}\n").as_bytes()).await?;
                            break;
                        }
                        reply
                    }
                    Err(err) => err,
                };
                output.write_all(format!("{reply}\n").as_bytes()).await?;
            }
            _ = tokio::time::sleep(wait.unwrap_or_default()), if wait.is_some() => {
                if store.poll() {
                    output.write_all(b"order complete; cart and details cleared\n").await?;
                }
            }
        }
        output.flush().await?;
    }

    output.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(parse_command("add 3"), Ok(SessionCommand::Add(LessonId(3))));
        assert_eq!(parse_command("inc 1"), Ok(SessionCommand::Increase(0)));
        assert_eq!(
            parse_command("sort price desc"),
            Ok(SessionCommand::Sort(SortField::Price, SortOrder::Desc))
        );
        assert_eq!(
            parse_command("name  John Smith "),
            Ok(SessionCommand::Name("John Smith".to_string()))
        );
        assert_eq!(parse_command("search"), Ok(SessionCommand::Search(String::new())));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_command("dec 0").is_err());
        assert!(parse_command("add maths").is_err());
        assert!(parse_command("sort colour").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn failed_checkout_lists_messages() {
        let mut store = Storefront::seeded();
        store.set_name("John3");
        let (_, reply) = apply_command(&mut store, SessionCommand::Checkout, Instant::now());
        assert!(reply.contains("Name must contain letters only."));
        assert!(reply.contains("Phone number must contain 8–15 digits."));
    }

    #[tokio::test]
    async fn pending_clear_fires_while_waiting_for_input() {
        let mut store = Storefront::new(storefront::Catalog::seeded(), Duration::from_millis(20));
        let (mut client, server) = tokio::io::duplex(4096);
        let mut output = Vec::new();

        let writer = async move {
            client
                .write_all(b"add 1\nname John Smith\nphone 12345678\ncheckout\n")
                .await
                .expect("write commands");
            tokio::time::sleep(Duration::from_millis(150)).await;
            client.write_all(b"cart\nquit\n").await.expect("write quit");
        };
        let session = run_session(&mut store, tokio::io::BufReader::new(server), &mut output);
        let (result, ()) = tokio::join!(session, writer);
        result.expect("session");

        let text = String::from_utf8(output).expect("utf8");
        assert!(text.contains("order confirmed for John Smith"), "{text}");
        assert!(text.contains("order complete; cart and details cleared"), "{text}");
        assert!(text.contains("cart is empty"), "{text}");
        assert!(store.cart_lines().is_empty());
        assert_eq!(store.lesson(LessonId(1)).map(|l| l.spaces), Some(4));
    }

    #[tokio::test]
    async fn session_ends_at_end_of_input() {
        let mut store = Storefront::seeded();
        let input: &[u8] = b"search hendon\nsort price desc\n";
        let mut output = Vec::new();
        run_session(&mut store, input, &mut output).await.expect("session");

        let text = String::from_utf8(output).expect("utf8");
        let cs = text.rfind("Computer Science").expect("cs listed");
        let history = text.rfind("History").expect("history listed");
        assert!(cs < history);
        assert_eq!(store.search_term(), "hendon");
    }
}
