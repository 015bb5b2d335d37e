//! Menu Commands

use serde::Serialize;

use super::{call, CallError, IdArgs, NoArgs};
use crate::models::Menu;

#[derive(Serialize)]
struct NewMenu<'a> {
    name: &'a str,
    slug: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateMenuArgs<'a> {
    new_menu: NewMenu<'a>,
}

pub async fn list_menus() -> Result<Vec<Menu>, CallError> {
    call("list_menus", &NoArgs {}).await
}

pub async fn create_menu(name: &str) -> Result<Menu, CallError> {
    let args = CreateMenuArgs {
        new_menu: NewMenu { name, slug: None },
    };
    call("create_menu", &args).await
}

pub async fn delete_menu(id: &str) -> Result<(), CallError> {
    call("delete_menu", &IdArgs { id }).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_admin_lib::commands::dispatch;
    use menu_admin_lib::config::AppConfig;
    use menu_admin_lib::AppState;

    #[tokio::test]
    async fn test_menu_args_match_backend_commands() {
        let state = AppState::open(AppConfig::in_memory()).await.unwrap();
        let args = CreateMenuArgs {
            new_menu: NewMenu { name: "Side Bar", slug: None },
        };
        let menu: Menu = serde_json::from_value(
            dispatch(&state, "create_menu", serde_json::to_value(&args).unwrap()).await.unwrap(),
        )
        .unwrap();
        assert_eq!(menu.slug, "side-bar");

        let listed = dispatch(&state, "list_menus", serde_json::to_value(NoArgs {}).unwrap()).await.unwrap();
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let deleted = dispatch(&state, "delete_menu", serde_json::to_value(IdArgs { id: &menu.id }).unwrap()).await;
        assert_eq!(deleted, Ok(serde_json::Value::Null));
    }
}
