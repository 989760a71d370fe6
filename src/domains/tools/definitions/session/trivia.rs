//! Random F1 facts from a fixed local list.

use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::domains::tools::context::ToolContext;
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::{F1Tool, NoParams, Reply};

pub const FACTS: &[&str] = &[
    "Lewis Hamilton holds the record for most pole positions with 104!",
    "Michael Schumacher won 7 World Championships (1994-1995, 2000-2004)",
    "The fastest F1 lap ever was 1:14.260 by Lewis Hamilton at Silverstone 2020",
    "Ferrari is the oldest team in F1, competing since 1950",
    "The most expensive F1 car ever was the McLaren MP4/1 at $50 million",
    "The shortest F1 race was the 2021 Belgian GP - just 3 laps behind safety car",
    "F1 cars can accelerate from 0-200 km/h in less than 5 seconds",
    "Monaco GP is the most prestigious race, held since 1929",
    "F1 engines reach temperatures of over 1000°C during races",
    "Sebastian Vettel won 4 consecutive championships (2010-2013) with Red Bull",
    "The longest F1 race was the 2011 Canadian GP at 4 hours and 4 minutes",
    "Ayrton Senna is considered one of the greatest drivers, with 41 wins and 3 championships",
    "DRS (Drag Reduction System) was introduced in 2011 to increase overtaking",
    "The 2020 Turkish GP saw the first intermediate tire win since 2008",
    "Max Verstappen became the youngest F1 winner at 18 years and 228 days",
];

#[derive(Debug, Clone)]
pub struct TriviaTool;

#[async_trait]
impl F1Tool for TriviaTool {
    const NAME: &'static str = "f1_trivia";
    const DESCRIPTION: &'static str = "Get random F1 trivia and facts";
    const FAILURE: &'static str = "Failed to get F1 trivia";
    type Params = NoParams;

    async fn run(_params: NoParams, _ctx: &ToolContext) -> ToolResult<Reply> {
        let fact = FACTS
            .choose(&mut rand::thread_rng())
            .ok_or_else(|| ToolError::internal("trivia list is empty"))?;

        Ok(Reply::Text(format!(
            "🧠 **F1 Trivia Time!**\n\n{fact}\n\n💡 Want more F1 facts? Just ask for another trivia!"
        )))
    }
}
