#[cfg(test)]
mod common;



#[cfg(test)]
mod test_defend;

#[cfg(test)]
mod test_potion;

#[cfg(test)]
mod test_idle_guard;
