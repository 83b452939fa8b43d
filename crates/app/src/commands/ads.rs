use commendai_core::domain::ads::{AdPosition, Viewport};
use commendai_core::i18n::MessageKey;

use crate::ads::{AdRotator, RenderedAd};
use crate::cli::AdsArgs;
use crate::commands::CommandError;
use crate::state::AppState;

pub async fn show(state: &AppState, args: AdsArgs) -> Result<(), CommandError> {
    let slot = AdPosition::parse(&args.slot)?;
    let viewport = Viewport::new(args.viewport_width.unwrap_or(state.config.viewport_width));
    let period = state.config.ad_rotation_interval;
    let rotator = AdRotator::new(
        state.api.clone(),
        slot,
        viewport,
        period,
        state.config.request_timeout,
    );

    let label = state.translator.t(MessageKey::AdLabel);
    if rotator.load().await == 0 {
        return Ok(());
    }
    print_ad(label, rotator.render().await);

    let mut last = rotator.current_index().await;
    for _ in 0..args.watch {
        if !rotator.is_rotating().await {
            break;
        }
        tokio::time::sleep(period).await;
        let current = rotator.current_index().await;
        if current != last {
            print_ad(label, rotator.render().await);
            last = current;
        }
    }
    rotator.teardown().await;
    Ok(())
}

fn print_ad(label: &str, ad: Option<RenderedAd>) {
    let Some(ad) = ad else {
        return;
    };
    println!("[{label} {}/{}] {}", ad.index + 1, ad.total, ad.text);
    if ad.overflow {
        println!("  (truncated in slot)");
    }
    if let Some(link) = ad.link_url {
        println!("  -> {link}");
    }
}
