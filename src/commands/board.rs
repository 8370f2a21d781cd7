use anyhow::Result;
use bronto_client::{BoardStore, CalendarStore};

/// Create a board for the user, reusing their calendar if one exists.
pub async fn init(user: &str) -> Result<()> {
    let api = super::api()?;

    let mut calendars = CalendarStore::new(api.clone());
    calendars.load_calendar_for_user(user).await?;

    let calendar_id = match calendars.calendars().first() {
        Some(calendar) => calendar.id.clone(),
        None => {
            let calendar = calendars.create_calendar(user).await?;
            println!("Created calendar {}", calendar.id);
            calendar.id
        }
    };

    let mut boards = BoardStore::new(api);
    let board = boards.initialize_board(user, &calendar_id).await?;

    println!("Created board {} (calendar {})", board.id, board.calendar);
    Ok(())
}

pub async fn list(user: &str) -> Result<()> {
    let mut store = BoardStore::new(super::api()?);

    store.load_boards_for_user(user).await?;

    if store.boards().is_empty() {
        println!("No boards found.");
        return Ok(());
    }

    for board in store.boards() {
        println!("{}  calendar: {}", board.id, board.calendar);
    }
    Ok(())
}

pub async fn classes(board_id: &str) -> Result<()> {
    let mut store = BoardStore::new(super::api()?);

    store.load_classes_for_board(board_id).await?;

    if store.classes().is_empty() {
        println!("No classes on this board yet.");
        return Ok(());
    }

    for class in store.classes() {
        println!("{}  {} - {}", class.id, class.name, class.overview);
    }
    Ok(())
}

pub async fn new_class(user: &str, board_id: &str, name: &str, overview: &str) -> Result<()> {
    let mut store = BoardStore::new(super::api()?);
    super::select_board(&mut store, user, board_id).await?;

    let class = store.create_class(name, overview).await?;

    println!("Created class {} ({})", class.name, class.id);
    Ok(())
}
