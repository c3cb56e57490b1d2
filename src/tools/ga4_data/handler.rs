use super::dto::GetGa4DataInput;
use super::implementation::Ga4DataTools;
use crate::error::Result;
use crate::tools::ToolOutput;

pub async fn get_ga4_data(tools: &Ga4DataTools, input: GetGa4DataInput) -> Result<ToolOutput> {
    Ok(tools.get_ga4_data(input).await)
}
